// rfidwriter-rs/rfidwriter/src/protocol/mod.rs

pub mod command;
pub mod framer;
pub mod gate;
pub mod response;

pub use command::{CommandRecord, Opcode, Request};
pub use framer::{CommandFramer, FrameEvent};
pub use gate::{AckOutcome, ConfirmationGate, ConfirmationState};
pub use response::Responder;
