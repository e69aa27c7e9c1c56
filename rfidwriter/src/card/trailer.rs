// rfidwriter-rs/rfidwriter/src/card/trailer.rs

use crate::constants::{ACCESS_BITS_SIZE, BLOCK_SIZE, KEY_SIZE, TRAILER_PAYLOAD_LEN};
use crate::types::{AccessBits, KeySelector, MifareKey};
use crate::{Error, Result};

const ACCESS_OFFSET: usize = KEY_SIZE;
const KEY_B_OFFSET: usize = KEY_SIZE + ACCESS_BITS_SIZE;

/// Parameters of the `T` and `t` commands: the sector trailer layout
/// (key A, access bytes, key B) plus the key to authenticate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trailer {
    pub key_a: MifareKey,
    pub access: AccessBits,
    pub key_b: MifareKey,
    pub selected: KeySelector,
}

impl Trailer {
    /// Parse the 17 byte command payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.len() != TRAILER_PAYLOAD_LEN {
            return Err(Error::InvalidParameter(
                "trailer takes 16 bytes and a key selector",
            ));
        }
        let selected = KeySelector::from_selector_byte(payload[BLOCK_SIZE])
            .ok_or(Error::InvalidParameter("key selector must be 'A' or 'B'"))?;

        let mut key_a = [0u8; KEY_SIZE];
        key_a.copy_from_slice(&payload[..ACCESS_OFFSET]);
        let mut access = [0u8; ACCESS_BITS_SIZE];
        access.copy_from_slice(&payload[ACCESS_OFFSET..KEY_B_OFFSET]);
        let mut key_b = [0u8; KEY_SIZE];
        key_b.copy_from_slice(&payload[KEY_B_OFFSET..BLOCK_SIZE]);

        Ok(Self {
            key_a: MifareKey::from_bytes(key_a),
            access: AccessBits::from_bytes(access),
            key_b: MifareKey::from_bytes(key_b),
            selected,
        })
    }

    /// The 16 bytes written to a trailer block.
    pub fn to_block(&self) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..ACCESS_OFFSET].copy_from_slice(self.key_a.as_bytes());
        block[ACCESS_OFFSET..KEY_B_OFFSET].copy_from_slice(self.access.as_bytes());
        block[KEY_B_OFFSET..].copy_from_slice(self.key_b.as_bytes());
        block
    }
}
