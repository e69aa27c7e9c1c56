// rfidwriter-rs/rfidwriter/src/lib.rs

//! rfidwriter
//!
//! Serial command processor for MFRC522 based MIFARE Classic
//! reader/writers. Commands from the host are framed, echoed back and only
//! run once the host confirms the echo; card presence is tracked between
//! commands.
#![warn(missing_docs)]

pub mod card;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
