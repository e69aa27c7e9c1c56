//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the host side of the serial protocol and the
//! mock setup so tests across the crate and tests/ directory can reuse the
//! same logic.
#![allow(dead_code)]

use crate::config::WriterConfig;
use crate::constants::{ACK, LINE_END, NACK};
use crate::device::{Initialized, Writer};
use crate::transport::mock::{MockSerial, MockTransceiver, SimCard};
use crate::types::{AccessBits, MifareKey};
use crate::utils::write_hex;
use crate::Result;

/// `<opcode><params>\r\n` as sent in byte mode.
#[doc(hidden)]
pub fn byte_command(opcode: u8, params: &[u8]) -> Vec<u8> {
    let mut out = vec![opcode];
    out.extend_from_slice(params);
    out.extend_from_slice(LINE_END);
    out
}

/// The same command as sent in text mode: parameters as hex pairs.
#[doc(hidden)]
pub fn text_command(opcode: u8, params: &[u8]) -> Vec<u8> {
    let mut out = vec![opcode];
    write_hex(&mut out, params);
    out.extend_from_slice(LINE_END);
    out
}

#[doc(hidden)]
pub fn ack() -> Vec<u8> {
    let mut out = vec![ACK];
    out.extend_from_slice(LINE_END);
    out
}

#[doc(hidden)]
pub fn nack() -> Vec<u8> {
    let mut out = vec![NACK];
    out.extend_from_slice(LINE_END);
    out
}

/// 17 byte payload of the `T` / `t` commands.
#[doc(hidden)]
pub fn trailer_payload(
    key_a: &MifareKey,
    access: &AccessBits,
    key_b: &MifareKey,
    selector: u8,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(17);
    out.extend_from_slice(key_a.as_bytes());
    out.extend_from_slice(access.as_bytes());
    out.extend_from_slice(key_b.as_bytes());
    out.push(selector);
    out
}

/// Convenience: an initialized writer on mock collaborators with the
/// start-up banner already taken off the output.
#[doc(hidden)]
pub fn mock_writer(card: Option<SimCard>) -> Result<Writer<MockSerial, MockTransceiver, Initialized>> {
    let pcd = match card {
        Some(card) => MockTransceiver::with_card(card),
        None => MockTransceiver::new(),
    };
    let mut writer = Writer::new(MockSerial::new(), pcd, WriterConfig::default()).initialize()?;
    writer.serial_mut().take_output();
    writer.transceiver_mut().take_calls();
    Ok(writer)
}

/// Poll until a pass neither executes a command nor leaves input behind,
/// at most `limit` passes. Returns the outcomes in order.
#[doc(hidden)]
pub fn poll_until_idle(
    writer: &mut Writer<MockSerial, MockTransceiver, Initialized>,
    limit: usize,
) -> Result<Vec<crate::device::PollOutcome>> {
    let mut outcomes = Vec::new();
    for _ in 0..limit {
        let outcome = writer.poll()?;
        outcomes.push(outcome);
        if outcome == crate::device::PollOutcome::Idle && writer.serial().input.is_empty() {
            break;
        }
    }
    Ok(outcomes)
}
