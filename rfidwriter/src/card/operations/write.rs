// rfidwriter-rs/rfidwriter/src/card/operations/write.rs

use log::{debug, warn};

use crate::card::keys::KeyRing;
use crate::card::operations::read::authenticate;
use crate::transport::traits::Transceiver;
use crate::types::{BlockData, Uid};
use crate::{Error, Result};

/// Authenticate and write a single block. No retry on failure.
pub fn write_block<P: Transceiver + ?Sized>(
    pcd: &mut P,
    keys: &KeyRing,
    uid: &Uid,
    block: u8,
    data: &BlockData,
) -> Result<()> {
    authenticate(pcd, keys, uid, block)?;
    pcd.write_block(block, data.as_bytes()).map_err(|status| {
        warn!("write of block {} failed: {}", block, status);
        Error::Write { block, status }
    })?;
    debug!("wrote block {}", block);
    Ok(())
}
