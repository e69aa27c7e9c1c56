use crate::types::{PiccType, Uid};

/// What the reader learned about the card in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardIdentity {
    uid: Uid,
    picc_type: PiccType,
}

impl CardIdentity {
    pub fn new(uid: Uid, picc_type: PiccType) -> Self {
        Self { uid, picc_type }
    }

    /// Classify a freshly selected card by its SAK.
    pub fn from_select(uid: Uid, sak: u8) -> Self {
        Self::new(uid, PiccType::from_sak(sak))
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn picc_type(&self) -> PiccType {
        self.picc_type
    }

    pub fn is_supported(&self) -> bool {
        self.picc_type.is_supported()
    }
}
