// rfidwriter-rs/rfidwriter/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{MockSerial, MockTransceiver, PcdCall, SimCard};
pub use traits::{InputChannel, OutputChannel, Transceiver};
