// rfidwriter-rs/rfidwriter/src/error.rs

use thiserror::Error;

/// Status reported by the PCD driver when a card operation fails.
///
/// The display strings match the names the MFRC522 Arduino library reports
/// so hosts that scrape comment lines keep working.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PcdStatus {
    #[error("Error in communication.")]
    Error,
    #[error("Collission detected.")]
    Collision,
    #[error("Timeout in communication.")]
    Timeout,
    #[error("A buffer is not big enough.")]
    NoRoom,
    #[error("Internal error in the code. Should not happen.")]
    InternalError,
    #[error("Invalid argument.")]
    Invalid,
    #[error("The CRC_A does not match.")]
    CrcWrong,
    #[error("A MIFARE PICC responded with NAK.")]
    MifareNack,
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Command too long")]
    CommandTooLong { max: usize },

    #[error("Only 2 digit hex chars are allowed in text mode")]
    InvalidHexDigit { byte: u8 },

    #[error("Incomplete hex pair at end of command")]
    IncompleteHexPair,

    #[error("Unknown command: {opcode:#04x}")]
    UnknownOpcode { opcode: u8 },

    #[error("Expected ACK or NACK followed by CR LF, got {bytes:02x?}")]
    MalformedAck { bytes: [u8; 3] },

    #[error("Invalid address: sector {sector}, block {block}, count {count}")]
    InvalidAddress { sector: u8, block: u8, count: u8 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("auth error for block {block}: {status}")]
    Authentication { block: u8, status: PcdStatus },

    #[error("read error for block {block}: {status}")]
    Read { block: u8, status: PcdStatus },

    #[error("write error for block {block}: {status}")]
    Write { block: u8, status: PcdStatus },

    #[error("access bits of block {block} do not match")]
    AccessMismatch { block: u8 },

    #[error("Selftest is not supported for this card (version: {version:02X})")]
    SelfTestUnsupported { version: u8 },

    #[error("output channel error: {0}")]
    Output(String),
}

impl Error {
    /// Errors raised while assembling a command from the byte stream.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Error::CommandTooLong { .. }
                | Error::InvalidHexDigit { .. }
                | Error::IncompleteHexPair
                | Error::UnknownOpcode { .. }
        )
    }

    /// Errors detected before the card is touched. They are answered with
    /// an invalid-command line and no NACK.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress { .. }
                | Error::InvalidParameter(_)
                | Error::SelfTestUnsupported { .. }
        )
    }

    /// Failures reported by the card or the reader during an operation.
    pub fn is_card_failure(&self) -> bool {
        matches!(
            self,
            Error::Authentication { .. }
                | Error::Read { .. }
                | Error::Write { .. }
                | Error::AccessMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
