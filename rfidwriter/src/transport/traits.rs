// rfidwriter-rs/rfidwriter/src/transport/traits.rs

use crate::Result;
use crate::constants::{BLOCK_SIZE, READ_BUFFER_SIZE};
use crate::error::PcdStatus;
use crate::types::{KeySelector, MifareKey, Uid};

/// Receiving side of the serial link.
pub trait InputChannel {
    /// Number of bytes that can be read without blocking
    fn available(&self) -> usize;

    /// Next received byte, if any
    fn read_byte(&mut self) -> Option<u8>;
}

/// Sending side of the serial link. The responder writes whole lines.
pub trait OutputChannel {
    fn write(&mut self, data: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collecting sink, convenient for hosts that forward lines elsewhere.
impl OutputChannel for Vec<u8> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Proximity coupling device (the MFRC522 driver).
///
/// Bit-level MIFARE handling lives behind this trait; failures come back as
/// the driver's status code.
pub trait Transceiver {
    /// Re-initialise the chip. Cards already in the field are detected
    /// again afterwards.
    fn reset(&mut self) {}

    /// REQA + anticollision + select of a card that just entered the field.
    /// Returns the UID and the SAK byte.
    fn detect_new_card(&mut self) -> Option<(Uid, u8)>;

    /// WUPA + select of the given card. Also wakes a halted card.
    fn wakeup_and_select(&mut self, uid: &Uid) -> std::result::Result<(), PcdStatus>;

    /// MIFARE Classic authentication of the sector holding `block`.
    fn authenticate(
        &mut self,
        key_type: KeySelector,
        block: u8,
        key: &MifareKey,
        uid: &Uid,
    ) -> std::result::Result<(), PcdStatus>;

    /// Read one block into `buf` (16 data bytes followed by CRC_A).
    /// Returns the number of bytes received, CRC included.
    fn read_block(
        &mut self,
        block: u8,
        buf: &mut [u8; READ_BUFFER_SIZE],
    ) -> std::result::Result<usize, PcdStatus>;

    fn write_block(
        &mut self,
        block: u8,
        data: &[u8; BLOCK_SIZE],
    ) -> std::result::Result<(), PcdStatus>;

    /// Content of the chip's VersionReg
    fn version(&mut self) -> u8;

    /// Run the chip's built-in self-test
    fn self_test(&mut self) -> bool;

    fn stop_crypto(&mut self);

    /// HLTA to the selected card
    fn halt(&mut self);
}
