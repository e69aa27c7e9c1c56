// rfidwriter-rs/rfidwriter/src/card/keys.rs

use crate::card::trailer::Trailer;
use crate::types::{AccessBits, KeySelector, MifareKey};

/// Keys and access bytes used for every card operation.
///
/// Starts with the factory defaults and changes only through the `T`/`t`
/// commands or a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyRing {
    key_a: MifareKey,
    key_b: MifareKey,
    access_bits: AccessBits,
    selected: KeySelector,
}

impl KeyRing {
    pub fn new(
        key_a: MifareKey,
        key_b: MifareKey,
        access_bits: AccessBits,
        selected: KeySelector,
    ) -> Self {
        Self {
            key_a,
            key_b,
            access_bits,
            selected,
        }
    }

    pub fn key(&self, selector: KeySelector) -> &MifareKey {
        match selector {
            KeySelector::A => &self.key_a,
            KeySelector::B => &self.key_b,
        }
    }

    /// The selected key and which one it is.
    pub fn active(&self) -> (KeySelector, &MifareKey) {
        (self.selected, self.key(self.selected))
    }

    pub fn access_bits(&self) -> &AccessBits {
        &self.access_bits
    }

    pub fn selected(&self) -> KeySelector {
        self.selected
    }

    /// Replace every field with the trailer's.
    pub fn apply(&mut self, trailer: &Trailer) {
        self.key_a = trailer.key_a;
        self.key_b = trailer.key_b;
        self.access_bits = trailer.access;
        self.selected = trailer.selected;
    }
}

impl From<&Trailer> for KeyRing {
    fn from(trailer: &Trailer) -> Self {
        Self::new(
            trailer.key_a,
            trailer.key_b,
            trailer.access,
            trailer.selected,
        )
    }
}
