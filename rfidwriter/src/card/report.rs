// rfidwriter-rs/rfidwriter/src/card/report.rs

//! Outcomes of card detection and of the trailer audit, handed to the
//! responder for rendering.

use crate::card::info::CardIdentity;
use crate::error::PcdStatus;
use crate::types::AccessBits;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    /// A supported card entered the field. `auth` is the result of the
    /// initial authentication against the first trailer.
    Connected {
        identity: CardIdentity,
        auth: std::result::Result<(), PcdStatus>,
    },
    /// A card entered the field but is not a MIFARE Classic 1K/4K.
    Unsupported(CardIdentity),
    /// The supported card no longer answers.
    Removed,
}

/// Result of checking one sector trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorAudit {
    sector: u8,
    access: Option<AccessBits>,
    result: Result<()>,
}

impl SectorAudit {
    pub fn new(sector: u8, access: Option<AccessBits>, result: Result<()>) -> Self {
        Self {
            sector,
            access,
            result,
        }
    }

    pub fn sector(&self) -> u8 {
        self.sector
    }

    /// Access bytes as read from the card, if the read succeeded.
    pub fn access(&self) -> Option<&AccessBits> {
        self.access.as_ref()
    }

    pub fn result(&self) -> &Result<()> {
        &self.result
    }

    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrailerAudit {
    sectors: Vec<SectorAudit>,
}

impl TrailerAudit {
    pub fn new(sectors: Vec<SectorAudit>) -> Self {
        Self { sectors }
    }

    pub fn push(&mut self, sector: SectorAudit) {
        self.sectors.push(sector);
    }

    pub fn sectors(&self) -> &[SectorAudit] {
        &self.sectors
    }

    /// True when every sector passed.
    pub fn passed(&self) -> bool {
        self.sectors.iter().all(SectorAudit::passed)
    }

    pub fn failed_sectors(&self) -> impl Iterator<Item = u8> + '_ {
        self.sectors
            .iter()
            .filter(|s| !s.passed())
            .map(SectorAudit::sector)
    }
}
