// rfidwriter-rs/rfidwriter/src/config.rs
//! Firmware defaults and the per-writer configuration

use crate::card::KeyRing;
use crate::types::{AccessBits, EncodingMode, MifareKey};

/// Serial line speed, 8N1
pub const SERIAL_BAUDRATE: u32 = 115_200;

/// Reported in the start-up banner
pub const FIRMWARE_VERSION: &str = "1.0";

pub const DEFAULT_KEY: MifareKey = MifareKey::FACTORY;
pub const DEFAULT_ACCESS_BITS: AccessBits = AccessBits::TRANSPORT;

/// State a writer starts with and returns to on reset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterConfig {
    pub initial_mode: EncodingMode,
    pub keys: KeyRing,
    pub baud_rate: u32,
    pub version: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            initial_mode: EncodingMode::Byte,
            keys: KeyRing::default(),
            baud_rate: SERIAL_BAUDRATE,
            version: FIRMWARE_VERSION.to_string(),
        }
    }
}
