// rfidwriter-rs/rfidwriter/src/card/operations/read.rs

use log::{debug, warn};

use crate::card::addressing::BlockRange;
use crate::card::keys::KeyRing;
use crate::constants::{BLOCK_SIZE, READ_BUFFER_SIZE};
use crate::error::PcdStatus;
use crate::transport::traits::Transceiver;
use crate::types::{BlockData, Uid};
use crate::{Error, Result};

/// Authenticate the sector holding `block` with the selected key.
pub fn authenticate<P: Transceiver + ?Sized>(
    pcd: &mut P,
    keys: &KeyRing,
    uid: &Uid,
    block: u8,
) -> Result<()> {
    let (selector, key) = keys.active();
    pcd.authenticate(selector, block, key, uid).map_err(|status| {
        warn!("auth with key {} failed for block {}: {}", selector, block, status);
        Error::Authentication { block, status }
    })
}

/// Read one block. The transceiver returns the block followed by CRC_A.
pub fn read_block<P: Transceiver + ?Sized>(pcd: &mut P, block: u8) -> Result<BlockData> {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let n = pcd
        .read_block(block, &mut buf)
        .map_err(|status| Error::Read { block, status })?;
    if n < BLOCK_SIZE {
        return Err(Error::Read {
            block,
            status: PcdStatus::NoRoom,
        });
    }
    BlockData::try_from(&buf[..BLOCK_SIZE])
}

/// Read every block of `range`, handing each one to `on_block` as soon as
/// it arrives. The first failure ends the read; blocks already delivered
/// stay delivered.
pub fn read_blocks<P, F>(
    pcd: &mut P,
    keys: &KeyRing,
    uid: &Uid,
    range: BlockRange,
    mut on_block: F,
) -> Result<()>
where
    P: Transceiver + ?Sized,
    F: FnMut(u8, &BlockData) -> Result<()>,
{
    for block in range.blocks() {
        if range.needs_auth(block) {
            authenticate(pcd, keys, uid, block)?;
        }
        let data = read_block(pcd, block).inspect_err(|e| warn!("{}", e))?;
        on_block(block, &data)?;
    }
    debug!("read {} block(s) from {}", range.count(), range.start());
    Ok(())
}
