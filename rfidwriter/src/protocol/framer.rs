// rfidwriter-rs/rfidwriter/src/protocol/framer.rs

use log::{debug, trace};

use crate::Error;
use crate::constants::{CR, LF, MAX_CMD_LEN};
use crate::protocol::command::{CommandRecord, Opcode};
use crate::types::EncodingMode;
use crate::utils::hex_value;

/// Result of feeding one byte into the framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// More bytes are needed
    Incomplete,
    /// A complete command in the allow-set was terminated by CR LF
    Framed(CommandRecord),
    /// The mode toggle command was consumed; carries the new mode
    ModeToggled(EncodingMode),
    /// The buffered command was discarded. The caller drains pending input.
    FramingError(Error),
}

/// Assembles commands from the serial byte stream.
///
/// Wire format: `<opcode><params>\r\n`. The opcode is always a literal
/// byte; in text mode every parameter byte arrives as two hex digits.
#[derive(Debug)]
pub struct CommandFramer {
    mode: EncodingMode,
    buf: [u8; MAX_CMD_LEN],
    len: usize,
    pending_cr: bool,
    high_nibble: Option<u8>,
}

impl CommandFramer {
    pub fn new(mode: EncodingMode) -> Self {
        Self {
            mode,
            buf: [0; MAX_CMD_LEN],
            len: 0,
            pending_cr: false,
            high_nibble: None,
        }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Decoded bytes buffered so far (opcode included).
    pub fn buffered(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0 && !self.pending_cr && self.high_nibble.is_none()
    }

    /// Drop any partially assembled command.
    pub fn reset(&mut self) {
        self.len = 0;
        self.pending_cr = false;
        self.high_nibble = None;
    }

    /// Restore the start-up state, including the encoding mode.
    pub fn reset_to(&mut self, mode: EncodingMode) {
        self.reset();
        self.mode = mode;
    }

    pub fn feed(&mut self, byte: u8) -> FrameEvent {
        trace!("framer <- {:#04x}", byte);

        if self.pending_cr {
            self.pending_cr = false;
            if byte == LF {
                return self.terminate();
            }
            // the CR was part of the command
            if let Err(e) = self.accept(CR) {
                return self.fail(e);
            }
        }

        if byte == CR {
            self.pending_cr = true;
            return FrameEvent::Incomplete;
        }

        if byte == LF && self.len == 0 && self.high_nibble.is_none() {
            return FrameEvent::Incomplete;
        }

        match self.accept(byte) {
            Ok(()) => FrameEvent::Incomplete,
            Err(e) => self.fail(e),
        }
    }

    fn accept(&mut self, byte: u8) -> Result<(), Error> {
        if self.len == 0 {
            return self.push(byte);
        }
        match self.mode {
            EncodingMode::Byte => self.push(byte),
            EncodingMode::Text => {
                let nibble = hex_value(byte).ok_or(Error::InvalidHexDigit { byte })?;
                match self.high_nibble.take() {
                    None => {
                        self.high_nibble = Some(nibble);
                        Ok(())
                    }
                    Some(hi) => self.push(hi << 4 | nibble),
                }
            }
        }
    }

    fn push(&mut self, byte: u8) -> Result<(), Error> {
        if self.len >= MAX_CMD_LEN {
            return Err(Error::CommandTooLong { max: MAX_CMD_LEN });
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    fn terminate(&mut self) -> FrameEvent {
        if self.len == 0 {
            // CR LF without a command
            self.reset();
            return FrameEvent::Incomplete;
        }
        if self.high_nibble.is_some() {
            return self.fail(Error::IncompleteHexPair);
        }

        let Some(opcode) = Opcode::from_byte(self.buf[0]) else {
            let opcode = self.buf[0];
            return self.fail(Error::UnknownOpcode { opcode });
        };

        if opcode == Opcode::ToggleMode {
            self.mode = self.mode.toggled();
            self.reset();
            debug!("encoding mode toggled to {}", self.mode);
            return FrameEvent::ModeToggled(self.mode);
        }

        let event = match CommandRecord::new(opcode, &self.buf[1..self.len]) {
            Ok(record) => {
                debug!("framed {:?} with {} parameter bytes", opcode, self.len - 1);
                FrameEvent::Framed(record)
            }
            Err(e) => FrameEvent::FramingError(e),
        };
        self.reset();
        event
    }

    fn fail(&mut self, err: Error) -> FrameEvent {
        debug!("framing error: {}", err);
        self.reset();
        FrameEvent::FramingError(err)
    }
}

impl Default for CommandFramer {
    fn default() -> Self {
        Self::new(EncodingMode::default())
    }
}
