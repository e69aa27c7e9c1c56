// rfidwriter-rs/rfidwriter/src/types.rs

use crate::Error;
use crate::constants::{ACCESS_BITS_SIZE, BLOCK_SIZE, KEY_A_CHAR, KEY_B_CHAR, KEY_SIZE};
use derive_more::Display;
use std::convert::TryFrom;

const UID_MAX_LEN: usize = 10;

/// UID - 4, 7 または 10 バイト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid {
    bytes: [u8; UID_MAX_LEN],
    len: u8,
}

impl Uid {
    pub const MAX_LEN: usize = UID_MAX_LEN;

    /// No card selected yet
    pub const EMPTY: Self = Self {
        bytes: [0; UID_MAX_LEN],
        len: 0,
    };

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if !matches!(bytes.len(), 4 | 7 | 10) {
            return Err(Error::InvalidParameter("uid must be 4, 7 or 10 bytes"));
        }
        let mut arr = [0u8; Uid::MAX_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

/// MIFARE Crypto1 key (6 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MifareKey([u8; KEY_SIZE]);

impl MifareKey {
    /// Transport key of a factory fresh card
    pub const FACTORY: Self = Self([0xFF; KEY_SIZE]);

    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl Default for MifareKey {
    fn default() -> Self {
        Self::FACTORY
    }
}

/// Access-control bytes of a sector trailer (3 access bytes + 1 user byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessBits([u8; ACCESS_BITS_SIZE]);

impl AccessBits {
    /// Transport configuration; the last byte is free for custom data.
    pub const TRANSPORT: Self = Self([0xFF, 0x07, 0x80, 0x69]);

    pub const fn from_bytes(bytes: [u8; ACCESS_BITS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCESS_BITS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl Default for AccessBits {
    fn default() -> Self {
        Self::TRANSPORT
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidParameter("block content must be 16 bytes"))?;
        Ok(Self(arr))
    }
}

/// Which of the two stored keys authenticates.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeySelector {
    #[default]
    #[display(fmt = "A")]
    A,
    #[display(fmt = "B")]
    B,
}

impl KeySelector {
    /// Parse the selector byte that trails a trailer record.
    pub fn from_selector_byte(b: u8) -> Option<Self> {
        match b {
            KEY_A_CHAR => Some(Self::A),
            KEY_B_CHAR => Some(Self::B),
            _ => None,
        }
    }

    /// MIFARE authentication command code (PICC_CMD_MF_AUTH_KEY_A/B).
    pub fn auth_command(self) -> u8 {
        match self {
            Self::A => 0x60,
            Self::B => 0x61,
        }
    }
}

/// Parameter encoding on the serial link.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingMode {
    /// Parameters are raw bytes
    #[default]
    #[display(fmt = "byte")]
    Byte,
    /// Every parameter byte is sent as two hex digits
    #[display(fmt = "text")]
    Text,
}

impl EncodingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Byte => Self::Text,
            Self::Text => Self::Byte,
        }
    }

    pub fn is_text(self) -> bool {
        self == Self::Text
    }
}

/// Card family derived from the SAK byte, following the MFRC522 library's
/// PICC_GetType classification.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PiccType {
    #[display(fmt = "Unknown type")]
    Unknown,
    #[display(fmt = "PICC compliant with ISO/IEC 14443-4")]
    Iso14443_4,
    #[display(fmt = "PICC compliant with ISO/IEC 18092 (NFC)")]
    Iso18092,
    #[display(fmt = "MIFARE Mini, 320 bytes")]
    MifareMini,
    #[display(fmt = "MIFARE 1KB")]
    Mifare1K,
    #[display(fmt = "MIFARE 4KB")]
    Mifare4K,
    #[display(fmt = "MIFARE Ultralight or Ultralight C")]
    MifareUltralight,
    #[display(fmt = "MIFARE Plus")]
    MifarePlus,
    #[display(fmt = "MIFARE TNP3XXX")]
    MifareTnp3xxx,
    #[display(fmt = "SAK indicates UID is not complete.")]
    NotComplete,
}

impl PiccType {
    pub fn from_sak(sak: u8) -> Self {
        // bit 8 carries no type information
        match sak & 0x7F {
            0x04 => Self::NotComplete,
            0x09 => Self::MifareMini,
            0x08 => Self::Mifare1K,
            0x18 => Self::Mifare4K,
            0x00 => Self::MifareUltralight,
            0x10 | 0x11 => Self::MifarePlus,
            0x01 => Self::MifareTnp3xxx,
            0x20 => Self::Iso14443_4,
            0x40 => Self::Iso18092,
            _ => Self::Unknown,
        }
    }

    /// Only MIFARE Classic 1K and 4K cards are operated on.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Mifare1K | Self::Mifare4K)
    }
}
