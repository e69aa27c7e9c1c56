// rfidwriter-rs/rfidwriter/src/card/operations/diagnostics.rs

use log::debug;

use crate::constants::SELF_TEST_VERSIONS;
use crate::transport::traits::Transceiver;
use crate::{Error, Result};

/// Run the reader chip's self-test. Only chip versions that document the
/// test are accepted; `Ok(false)` means the test ran and failed.
pub fn self_test<P: Transceiver + ?Sized>(pcd: &mut P) -> Result<bool> {
    let version = pcd.version();
    if !SELF_TEST_VERSIONS.contains(&version) {
        return Err(Error::SelfTestUnsupported { version });
    }
    let passed = pcd.self_test();
    debug!("self-test on version {:#04x}: {}", version, passed);
    Ok(passed)
}

/// Stop crypto and halt the card. The next presence check wakes it again.
pub fn sleep<P: Transceiver + ?Sized>(pcd: &mut P) {
    pcd.stop_crypto();
    pcd.halt();
}
