// rfidwriter-rs/rfidwriter/src/protocol/response.rs

//! Everything the writer sends to the host goes through [`Responder`].
//!
//! A line is `<prefix><body>\r\n` and is handed to the output channel in a
//! single write. Comment lines (`#`) are meant for people at a terminal;
//! programs only look at the prefix byte.

use log::warn;

use crate::card::report::{CardEvent, TrailerAudit};
use crate::constants::*;
use crate::protocol::command::CommandRecord;
use crate::transport::traits::OutputChannel;
use crate::types::{BlockData, EncodingMode};
use crate::utils::write_hex;
use crate::{Error, Result};

pub struct Responder<'a> {
    out: &'a mut dyn OutputChannel,
    mode: EncodingMode,
}

impl<'a> Responder<'a> {
    pub fn new(out: &'a mut dyn OutputChannel, mode: EncodingMode) -> Self {
        Self { out, mode }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn line(&mut self, prefix: u8, body: &[u8]) -> Result<()> {
        let mut buf = Vec::with_capacity(body.len() + 3);
        buf.push(prefix);
        buf.extend_from_slice(body);
        buf.extend_from_slice(LINE_END);
        self.out.write(&buf)
    }

    pub fn marker(&mut self, prefix: u8) -> Result<()> {
        self.line(prefix, &[])
    }

    pub fn comment(&mut self, text: &str) -> Result<()> {
        self.line(COMMENT, text.as_bytes())
    }

    /// Comment that is only printed in text mode.
    pub fn verbose(&mut self, text: &str) -> Result<()> {
        if self.mode.is_text() {
            self.comment(text)?;
        }
        Ok(())
    }

    pub fn ack(&mut self) -> Result<()> {
        self.marker(ACK)
    }

    pub fn nack(&mut self) -> Result<()> {
        self.marker(NACK)
    }

    pub fn verdict(&mut self, success: bool) -> Result<()> {
        if success { self.ack() } else { self.nack() }
    }

    /// `PA` / `PN`
    pub fn partial(&mut self, marker: u8) -> Result<()> {
        self.line(PARTIAL_RESULT, &[marker])
    }

    pub fn auth_failed(&mut self) -> Result<()> {
        self.marker(AUTH_FAILED)
    }

    pub fn invalid_command(&mut self) -> Result<()> {
        self.marker(INVALID_COMMAND)
    }

    /// Start-up banner followed by the init-complete line.
    pub fn announce(&mut self, version: &str) -> Result<()> {
        self.comment("#RFID Initialization##")?;
        self.comment(&format!("RFID writer v{}", version))?;
        self.marker(INIT_COMPLETE)
    }

    /// Echo a framed command so the host can verify it before confirming.
    pub fn echo(&mut self, record: &CommandRecord) -> Result<()> {
        let wire = record.to_wire_bytes();
        match self.mode {
            EncodingMode::Byte => self.line(ERROR_CHECK, &wire),
            EncodingMode::Text => {
                let mut body = vec![record.opcode().as_byte()];
                write_hex(&mut body, record.payload());
                self.line(ERROR_CHECK, &body)?;
                self.equals(&wire)?;
                let prompt = format!(
                    "Please send {} for ACK or {} for NACK",
                    ACK as char, NACK as char
                );
                self.comment(&prompt)
            }
        }
    }

    pub fn mode_toggled(&mut self, mode: EncodingMode) -> Result<()> {
        self.comment(&format!("Toggled byte/text mode. Now using: {} mode", mode))
    }

    /// One block of a read as a partial result.
    pub fn block(&mut self, data: &BlockData) -> Result<()> {
        match self.mode {
            EncodingMode::Byte => self.line(PARTIAL_RESULT, data.as_bytes()),
            EncodingMode::Text => {
                let mut body = Vec::with_capacity(BLOCK_SIZE * 2);
                write_hex(&mut body, data.as_bytes());
                self.line(PARTIAL_RESULT, &body)?;
                self.equals(data.as_bytes())
            }
        }
    }

    /// `#Equals: ` followed by the raw bytes.
    fn equals(&mut self, raw: &[u8]) -> Result<()> {
        let mut body = b"Equals: ".to_vec();
        body.extend_from_slice(raw);
        self.line(COMMENT, &body)
    }

    pub fn card_event(&mut self, event: &CardEvent) -> Result<()> {
        match event {
            CardEvent::Connected { identity, auth } => {
                self.new_card(identity.picc_type())?;
                let uid = identity.uid();
                match self.mode {
                    EncodingMode::Byte => self.line(CARD_CHANGED, uid.as_bytes())?,
                    EncodingMode::Text => self.line(CARD_CHANGED, uid.to_hex().as_bytes())?,
                }
                if let Err(status) = auth {
                    self.verbose(&format!("auth error: {}", status))?;
                    self.auth_failed()?;
                }
                Ok(())
            }
            CardEvent::Unsupported(identity) => self.new_card(identity.picc_type()),
            CardEvent::Removed => {
                self.verbose("Card disconnected")?;
                self.marker(CARD_CHANGED)
            }
        }
    }

    fn new_card(&mut self, picc_type: crate::types::PiccType) -> Result<()> {
        self.verbose("New card connected:")?;
        self.verbose(&format!("Type: {}", picc_type))
    }

    /// Report a failed command. Only errors of the output channel itself
    /// are passed back.
    pub fn failure(&mut self, err: &Error) -> Result<()> {
        match err {
            Error::Output(_) => return Err(err.clone()),
            Error::Authentication { .. } => {
                self.auth_failed()?;
                self.comment(&err.to_string())?;
                self.nack()?;
            }
            Error::Read { .. } | Error::Write { .. } | Error::AccessMismatch { .. } => {
                self.comment(&err.to_string())?;
                self.nack()?;
            }
            Error::SelfTestUnsupported { .. }
            | Error::CommandTooLong { .. }
            | Error::InvalidHexDigit { .. }
            | Error::IncompleteHexPair => {
                self.comment(&err.to_string())?;
                self.invalid_command()?;
            }
            Error::UnknownOpcode { .. }
            | Error::MalformedAck { .. }
            | Error::InvalidAddress { .. }
            | Error::InvalidParameter(_) => self.invalid_command()?,
        }
        if err.is_card_failure() {
            warn!("{}", err);
        }
        Ok(())
    }

    /// Per-sector lines of a trailer audit, then the overall verdict.
    pub fn audit(&mut self, audit: &TrailerAudit) -> Result<()> {
        for sector in audit.sectors() {
            if let Err(e @ Error::Authentication { .. }) = sector.result() {
                self.auth_failed()?;
                self.comment(&e.to_string())?;
            } else if let Err(e @ Error::Read { .. }) = sector.result() {
                self.comment(&e.to_string())?;
            }
            if let Some(access) = sector.access() {
                self.comment(&format!("access: {}", access.to_hex()))?;
            }
            self.partial(if sector.passed() { ACK } else { NACK })?;
        }
        self.verdict(audit.passed())
    }
}
