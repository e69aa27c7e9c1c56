// rfidwriter-rs/rfidwriter/src/card/addressing.rs

use std::ops::RangeInclusive;

use crate::constants::{BLOCKS_PER_SECTOR, LAST_BLOCK, SECTOR_COUNT, TRAILER_BLOCK};
use crate::{Error, Result};

/// Absolute block number of `block` inside `sector`.
pub fn absolute_block(sector: u8, block: u8) -> u8 {
    sector * BLOCKS_PER_SECTOR + block
}

pub fn sector_of(block: u8) -> u8 {
    block / BLOCKS_PER_SECTOR
}

/// Absolute block numbers of all sector trailers, ascending.
pub fn trailer_blocks() -> impl Iterator<Item = u8> {
    (0..SECTOR_COUNT).map(|sector| absolute_block(sector, TRAILER_BLOCK))
}

/// Contiguous run of absolute blocks, validated against the 1K layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    start: u8,
    count: u8,
}

impl BlockRange {
    /// Range of a read command. Reads may span sectors and include
    /// trailers; they may not run past the last block.
    pub fn for_read(sector: u8, block: u8, count: u8) -> Result<Self> {
        let invalid = Error::InvalidAddress {
            sector,
            block,
            count,
        };
        if count == 0 || sector >= SECTOR_COUNT || block >= BLOCKS_PER_SECTOR {
            return Err(invalid);
        }
        let start = absolute_block(sector, block);
        if start as u16 + count as u16 - 1 > LAST_BLOCK as u16 {
            return Err(invalid);
        }
        Ok(Self { start, count })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Last block of the range (inclusive)
    pub fn end(&self) -> u8 {
        self.start + self.count - 1
    }

    pub fn blocks(&self) -> RangeInclusive<u8> {
        self.start..=self.end()
    }

    /// Authentication is per sector: needed for the first block and
    /// whenever the range enters the next sector.
    pub fn needs_auth(&self, block: u8) -> bool {
        block == self.start || block % BLOCKS_PER_SECTOR == 0
    }
}

/// Absolute block of a write command. The manufacturer block (sector 0,
/// block 0) and the trailers are never written this way.
pub fn write_target(sector: u8, block: u8) -> Result<u8> {
    if (sector == 0 && block == 0) || sector >= SECTOR_COUNT || block >= TRAILER_BLOCK {
        return Err(Error::InvalidAddress {
            sector,
            block,
            count: 1,
        });
    }
    Ok(absolute_block(sector, block))
}
