// rfidwriter-rs/rfidwriter/src/card/operations/trailer.rs

use log::{debug, warn};

use crate::card::addressing::{sector_of, trailer_blocks};
use crate::card::keys::KeyRing;
use crate::card::operations::read::{authenticate, read_block};
use crate::card::report::{SectorAudit, TrailerAudit};
use crate::card::trailer::Trailer;
use crate::constants::{ACCESS_BITS_SIZE, KEY_SIZE};
use crate::transport::traits::Transceiver;
use crate::types::{AccessBits, KeySelector, Uid};
use crate::{Error, Result};

/// Write `trailer` into every sector trailer, sector 0 first.
///
/// `on_sector` runs after each sector is written. On the first failure the
/// loop stops; sectors already rewritten keep the new trailer and the local
/// keys stay as they were. After a full pass the local keys take the new
/// values.
pub fn change_trailers<P, F>(
    pcd: &mut P,
    keys: &mut KeyRing,
    uid: &Uid,
    trailer: &Trailer,
    mut on_sector: F,
) -> Result<()>
where
    P: Transceiver + ?Sized,
    F: FnMut(u8) -> Result<()>,
{
    let block_data = trailer.to_block();
    for block in trailer_blocks() {
        authenticate(pcd, keys, uid, block)?;
        pcd.write_block(block, &block_data).map_err(|status| {
            warn!("trailer write of block {} failed: {}", block, status);
            Error::Write { block, status }
        })?;
        on_sector(sector_of(block))?;
    }
    keys.apply(trailer);
    debug!("all trailers changed, now using key {}", keys.selected());
    Ok(())
}

/// Compare the access bytes of every trailer with the local ones.
///
/// Always authenticates with key A. A failing sector does not stop the
/// audit.
pub fn check_trailers<P: Transceiver + ?Sized>(
    pcd: &mut P,
    keys: &KeyRing,
    uid: &Uid,
) -> TrailerAudit {
    let key_a = keys.key(KeySelector::A);
    let mut audit = TrailerAudit::default();

    for block in trailer_blocks() {
        let sector = sector_of(block);
        if let Err(status) = pcd.authenticate(KeySelector::A, block, key_a, uid) {
            warn!("audit: auth failed for block {}: {}", block, status);
            let err = Error::Authentication { block, status };
            audit.push(SectorAudit::new(sector, None, Err(err)));
            continue;
        }
        let data = match read_block(pcd, block) {
            Ok(data) => data,
            Err(e) => {
                warn!("audit: {}", e);
                audit.push(SectorAudit::new(sector, None, Err(e)));
                continue;
            }
        };

        let mut access = [0u8; ACCESS_BITS_SIZE];
        access.copy_from_slice(&data.as_bytes()[KEY_SIZE..KEY_SIZE + ACCESS_BITS_SIZE]);
        let access = AccessBits::from_bytes(access);
        let result = if access == *keys.access_bits() {
            Ok(())
        } else {
            debug!("audit: sector {} has access bytes {}", sector, access.to_hex());
            Err(Error::AccessMismatch { block })
        };
        audit.push(SectorAudit::new(sector, Some(access), result));
    }
    audit
}
