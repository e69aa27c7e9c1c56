// rfidwriter-rs/rfidwriter/src/prelude.rs

pub use crate::card::{
    CardEvent, CardIdentity, CardSession, KeyRing, SessionState, Trailer, TrailerAudit,
};
pub use crate::config::WriterConfig;
pub use crate::device::{Initialized, PollOutcome, Uninitialized, Writer, WriterBuilder};
pub use crate::protocol::{CommandFramer, CommandRecord, ConfirmationGate, ConfirmationState, Opcode, Responder};
pub use crate::transport::{InputChannel, OutputChannel, Transceiver};
pub use crate::{
    AccessBits, BlockData, EncodingMode, Error, KeySelector, MifareKey, PcdStatus, PiccType,
    Result, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, parse_hex};
