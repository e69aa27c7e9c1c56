// rfidwriter-rs/rfidwriter/src/card/mod.rs

use log::{debug, warn};

use crate::constants::TRAILER_BLOCK;
use crate::transport::traits::Transceiver;
use crate::types::{BlockData, Uid};
use crate::Result;

pub mod addressing;
pub mod info;
pub mod keys;
pub mod operations;
pub mod report;
pub mod trailer;

pub use addressing::BlockRange;
pub use info::CardIdentity;
pub use keys::KeyRing;
pub use report::{CardEvent, SectorAudit, TrailerAudit};
pub use trailer::Trailer;

/// Whether a supported card is currently in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoCard,
    CardPresent,
}

/// Card state and keys of one writer.
///
/// Commands always go to the card selected last, even when it has left the
/// field; the reader then reports the failure.
#[derive(Debug, Clone, Default)]
pub struct CardSession {
    identity: Option<CardIdentity>,
    uid: Uid,
    keys: KeyRing,
}

impl CardSession {
    pub fn new(keys: KeyRing) -> Self {
        Self {
            identity: None,
            uid: Uid::EMPTY,
            keys,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.identity.is_some() {
            SessionState::CardPresent
        } else {
            SessionState::NoCard
        }
    }

    /// The supported card in the field, if any.
    pub fn identity(&self) -> Option<&CardIdentity> {
        self.identity.as_ref()
    }

    /// UID of the card selected last.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }

    /// Look for a new card, or check that the current one is still there.
    pub fn refresh<P: Transceiver + ?Sized>(&mut self, pcd: &mut P) -> Option<CardEvent> {
        if self.identity.is_some() {
            return self.recheck(pcd);
        }

        let (uid, sak) = pcd.detect_new_card()?;
        self.uid = uid;
        let identity = CardIdentity::from_select(uid, sak);
        debug!(
            "new card {} ({})",
            identity.uid().to_hex(),
            identity.picc_type()
        );
        if !identity.is_supported() {
            return Some(CardEvent::Unsupported(identity));
        }

        self.identity = Some(identity);
        let (selector, key) = self.keys.active();
        let auth = pcd.authenticate(selector, TRAILER_BLOCK, key, &uid);
        if let Err(status) = auth {
            warn!("auth on connect failed: {}", status);
        }
        Some(CardEvent::Connected { identity, auth })
    }

    fn recheck<P: Transceiver + ?Sized>(&mut self, pcd: &mut P) -> Option<CardEvent> {
        match pcd.wakeup_and_select(&self.uid) {
            Ok(()) => None,
            Err(status) => {
                debug!("card {} lost: {}", self.uid.to_hex(), status);
                self.identity = None;
                Some(CardEvent::Removed)
            }
        }
    }

    /// Stream `count` blocks starting at `block` of `sector`.
    pub fn read<P, F>(
        &mut self,
        pcd: &mut P,
        sector: u8,
        block: u8,
        count: u8,
        on_block: F,
    ) -> Result<()>
    where
        P: Transceiver + ?Sized,
        F: FnMut(u8, &BlockData) -> Result<()>,
    {
        let range = BlockRange::for_read(sector, block, count)?;
        operations::read_blocks(pcd, &self.keys, &self.uid, range, on_block)
    }

    pub fn write<P: Transceiver + ?Sized>(
        &mut self,
        pcd: &mut P,
        sector: u8,
        block: u8,
        content: &[u8],
    ) -> Result<()> {
        let target = addressing::write_target(sector, block)?;
        let data = BlockData::try_from(content)?;
        operations::write_block(pcd, &self.keys, &self.uid, target, &data)
    }

    /// Switch the local keys; the card is not touched.
    pub fn set_trailers(&mut self, payload: &[u8]) -> Result<()> {
        let trailer = Trailer::parse(payload)?;
        self.keys.apply(&trailer);
        debug!("using key {} from now on", self.keys.selected());
        Ok(())
    }

    pub fn change_trailers<P, F>(&mut self, pcd: &mut P, payload: &[u8], on_sector: F) -> Result<()>
    where
        P: Transceiver + ?Sized,
        F: FnMut(u8) -> Result<()>,
    {
        let trailer = Trailer::parse(payload)?;
        operations::change_trailers(pcd, &mut self.keys, &self.uid, &trailer, on_sector)
    }

    pub fn check_trailers<P: Transceiver + ?Sized>(&mut self, pcd: &mut P) -> TrailerAudit {
        operations::check_trailers(pcd, &self.keys, &self.uid)
    }

    pub fn self_test<P: Transceiver + ?Sized>(&mut self, pcd: &mut P) -> Result<bool> {
        operations::self_test(pcd)
    }

    pub fn sleep<P: Transceiver + ?Sized>(&mut self, pcd: &mut P) {
        operations::sleep(pcd)
    }
}
