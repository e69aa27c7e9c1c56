// rfidwriter-rs/rfidwriter/src/transport/mock.rs

use std::collections::VecDeque;

use crate::constants::*;
use crate::error::PcdStatus;
use crate::transport::traits::{InputChannel, OutputChannel, Transceiver};
use crate::types::{AccessBits, KeySelector, MifareKey, Uid};
use crate::{Error, Result};

/// Mock serial port for unit tests. Input is queued by the test, output is
/// recorded.
#[derive(Debug, Default)]
pub struct MockSerial {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    /// Testing hook: make every write fail
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Recorded output split at CR LF, line ends stripped.
    pub fn output_lines(&self) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut rest = &self.output[..];
        while let Some(pos) = rest.windows(2).position(|w| w == LINE_END) {
            lines.push(rest[..pos].to_vec());
            rest = &rest[pos + 2..];
        }
        if !rest.is_empty() {
            lines.push(rest.to_vec());
        }
        lines
    }

    /// Drain the output and return it as lines.
    pub fn take_lines(&mut self) -> Vec<Vec<u8>> {
        let lines = self.output_lines();
        self.output.clear();
        lines
    }
}

impl InputChannel for MockSerial {
    fn available(&self) -> usize {
        self.input.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

impl OutputChannel for MockSerial {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Output("mock serial write failure".into()));
        }
        self.output.extend_from_slice(data);
        Ok(())
    }
}

/// Calls recorded by [`MockTransceiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcdCall {
    Reset,
    DetectNewCard,
    WakeupAndSelect,
    Authenticate { key_type: KeySelector, block: u8 },
    Read(u8),
    Write(u8, [u8; BLOCK_SIZE]),
    Version,
    SelfTest,
    StopCrypto,
    Halt,
}

/// Memory image of a MIFARE Classic card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCard {
    pub uid: Uid,
    pub sak: u8,
    pub blocks: [[u8; BLOCK_SIZE]; 64],
}

impl SimCard {
    /// Factory fresh 1K card: transport keys and access bytes in every
    /// trailer, the UID in the manufacturer block.
    pub fn mifare_1k(uid: &[u8]) -> Result<Self> {
        let uid = Uid::try_from(uid)?;
        let mut blocks = [[0u8; BLOCK_SIZE]; 64];
        let n = uid.len().min(BLOCK_SIZE);
        blocks[0][..n].copy_from_slice(&uid.as_bytes()[..n]);
        let mut card = Self {
            uid,
            sak: 0x08,
            blocks,
        };
        for sector in 0..SECTOR_COUNT {
            card.set_trailer(
                sector,
                &MifareKey::FACTORY,
                &AccessBits::TRANSPORT,
                &MifareKey::FACTORY,
            );
        }
        Ok(card)
    }

    pub fn with_sak(mut self, sak: u8) -> Self {
        self.sak = sak;
        self
    }

    pub fn trailer_block(sector: u8) -> u8 {
        sector * BLOCKS_PER_SECTOR + TRAILER_BLOCK
    }

    pub fn trailer(&self, sector: u8) -> [u8; BLOCK_SIZE] {
        self.blocks[Self::trailer_block(sector) as usize]
    }

    pub fn set_trailer(
        &mut self,
        sector: u8,
        key_a: &MifareKey,
        access: &AccessBits,
        key_b: &MifareKey,
    ) {
        let t = &mut self.blocks[Self::trailer_block(sector) as usize];
        t[0..6].copy_from_slice(key_a.as_bytes());
        t[6..10].copy_from_slice(access.as_bytes());
        t[10..16].copy_from_slice(key_b.as_bytes());
    }

    fn key(&self, sector: u8, key_type: KeySelector) -> [u8; KEY_SIZE] {
        let t = self.trailer(sector);
        let range = match key_type {
            KeySelector::A => 0..6,
            KeySelector::B => 10..16,
        };
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&t[range]);
        key
    }
}

/// Simulated PCD holding at most one card. Authentication checks the key
/// against the sector trailer, reads and writes require the sector to be
/// authenticated, and key A reads back as zeros like on real cards.
#[derive(Debug)]
pub struct MockTransceiver {
    pub card: Option<SimCard>,
    pub calls: Vec<PcdCall>,
    /// VersionReg content, 0x92 is MFRC522 v2.0
    pub version: u8,
    pub self_test_passes: bool,
    /// Testing hooks: blocks whose auth/read/write fail regardless of keys
    pub fail_auth: Vec<u8>,
    pub fail_read: Vec<u8>,
    pub fail_write: Vec<u8>,
    announced: bool,
    halted: bool,
    authenticated: Option<u8>,
}

impl Default for MockTransceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self {
            card: None,
            calls: Vec::new(),
            version: 0x92,
            self_test_passes: true,
            fail_auth: Vec::new(),
            fail_read: Vec::new(),
            fail_write: Vec::new(),
            announced: false,
            halted: false,
            authenticated: None,
        }
    }

    pub fn with_card(card: SimCard) -> Self {
        let mut m = Self::new();
        m.insert(card);
        m
    }

    /// Put a card into the field; it will be reported once by detection.
    pub fn insert(&mut self, card: SimCard) {
        self.card = Some(card);
        self.announced = false;
        self.halted = false;
        self.authenticated = None;
    }

    /// Take the card out of the field.
    pub fn remove(&mut self) -> Option<SimCard> {
        self.authenticated = None;
        self.card.take()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn take_calls(&mut self) -> Vec<PcdCall> {
        std::mem::take(&mut self.calls)
    }

    /// Blocks written so far, in call order.
    pub fn written_blocks(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PcdCall::Write(b, _) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn auth_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PcdCall::Authenticate { .. }))
            .count()
    }

    fn require_auth(&self, block: u8) -> std::result::Result<(), PcdStatus> {
        match self.authenticated {
            Some(sector) if sector == block / BLOCKS_PER_SECTOR => Ok(()),
            _ => Err(PcdStatus::Error),
        }
    }
}

impl Transceiver for MockTransceiver {
    fn reset(&mut self) {
        self.calls.push(PcdCall::Reset);
        self.announced = false;
        self.halted = false;
        self.authenticated = None;
    }

    fn detect_new_card(&mut self) -> Option<(Uid, u8)> {
        self.calls.push(PcdCall::DetectNewCard);
        if self.announced {
            return None;
        }
        let card = self.card.as_ref()?;
        self.announced = true;
        self.halted = false;
        Some((card.uid, card.sak))
    }

    fn wakeup_and_select(&mut self, uid: &Uid) -> std::result::Result<(), PcdStatus> {
        self.calls.push(PcdCall::WakeupAndSelect);
        match &self.card {
            Some(card) if card.uid == *uid => {
                self.halted = false;
                self.authenticated = None;
                Ok(())
            }
            _ => Err(PcdStatus::Timeout),
        }
    }

    fn authenticate(
        &mut self,
        key_type: KeySelector,
        block: u8,
        key: &MifareKey,
        uid: &Uid,
    ) -> std::result::Result<(), PcdStatus> {
        self.calls.push(PcdCall::Authenticate { key_type, block });
        self.authenticated = None;
        let card = match &self.card {
            Some(card) if !self.halted && card.uid == *uid => card,
            _ => return Err(PcdStatus::Timeout),
        };
        if block > LAST_BLOCK {
            return Err(PcdStatus::Invalid);
        }
        if self.fail_auth.contains(&block) {
            return Err(PcdStatus::Timeout);
        }
        let sector = block / BLOCKS_PER_SECTOR;
        // a wrong key makes the card go silent
        if card.key(sector, key_type) != *key.as_bytes() {
            return Err(PcdStatus::Timeout);
        }
        self.authenticated = Some(sector);
        Ok(())
    }

    fn read_block(
        &mut self,
        block: u8,
        buf: &mut [u8; READ_BUFFER_SIZE],
    ) -> std::result::Result<usize, PcdStatus> {
        self.calls.push(PcdCall::Read(block));
        self.require_auth(block)?;
        if self.fail_read.contains(&block) {
            return Err(PcdStatus::CrcWrong);
        }
        let card = self.card.as_ref().ok_or(PcdStatus::Timeout)?;
        buf[..BLOCK_SIZE].copy_from_slice(&card.blocks[block as usize]);
        if block % BLOCKS_PER_SECTOR == TRAILER_BLOCK {
            buf[..KEY_SIZE].fill(0);
        }
        buf[BLOCK_SIZE..].fill(0);
        Ok(READ_BUFFER_SIZE)
    }

    fn write_block(
        &mut self,
        block: u8,
        data: &[u8; BLOCK_SIZE],
    ) -> std::result::Result<(), PcdStatus> {
        self.calls.push(PcdCall::Write(block, *data));
        self.require_auth(block)?;
        if self.fail_write.contains(&block) {
            return Err(PcdStatus::MifareNack);
        }
        let card = self.card.as_mut().ok_or(PcdStatus::Timeout)?;
        card.blocks[block as usize] = *data;
        Ok(())
    }

    fn version(&mut self) -> u8 {
        self.calls.push(PcdCall::Version);
        self.version
    }

    fn self_test(&mut self) -> bool {
        self.calls.push(PcdCall::SelfTest);
        self.self_test_passes
    }

    fn stop_crypto(&mut self) {
        self.calls.push(PcdCall::StopCrypto);
        self.authenticated = None;
    }

    fn halt(&mut self) {
        self.calls.push(PcdCall::Halt);
        self.halted = true;
        self.authenticated = None;
    }
}
