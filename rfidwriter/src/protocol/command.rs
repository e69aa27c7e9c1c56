// rfidwriter-rs/rfidwriter/src/protocol/command.rs

use crate::constants::*;
use crate::{Error, Result};

/// Single-byte command selector received from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    Read,
    Write,
    SetTrailers,
    ChangeTrailers,
    CheckTrailers,
    SelfTest,
    Reset,
    ToggleMode,
}

impl Opcode {
    /// Map a wire byte onto an opcode of the allow-set.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            CMD_READ => Some(Self::Read),
            CMD_WRITE => Some(Self::Write),
            CMD_SET_TRAILERS => Some(Self::SetTrailers),
            CMD_CHANGE_TRAILERS => Some(Self::ChangeTrailers),
            CMD_CHECK_TRAILERS => Some(Self::CheckTrailers),
            CMD_SELF_TEST => Some(Self::SelfTest),
            CMD_RESET => Some(Self::Reset),
            CMD_TOGGLE_MODE => Some(Self::ToggleMode),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Read => CMD_READ,
            Self::Write => CMD_WRITE,
            Self::SetTrailers => CMD_SET_TRAILERS,
            Self::ChangeTrailers => CMD_CHANGE_TRAILERS,
            Self::CheckTrailers => CMD_CHECK_TRAILERS,
            Self::SelfTest => CMD_SELF_TEST,
            Self::Reset => CMD_RESET,
            Self::ToggleMode => CMD_TOGGLE_MODE,
        }
    }
}

/// A complete command as framed from the serial stream: the opcode and the
/// decoded parameter bytes. Fixed capacity, no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRecord {
    opcode: Opcode,
    payload: [u8; MAX_PAYLOAD_LEN],
    len: u8,
}

impl CommandRecord {
    pub fn new(opcode: Opcode, payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::CommandTooLong { max: MAX_CMD_LEN });
        }
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        buf[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            opcode,
            payload: buf,
            len: payload.len() as u8,
        })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.len as usize]
    }

    /// Opcode followed by the payload, as echoed in byte mode.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.len as usize);
        out.push(self.opcode.as_byte());
        out.extend_from_slice(self.payload());
        out
    }

    /// Split the payload into the parameters of the opcode.
    pub fn request(&self) -> Result<Request<'_>> {
        let p = self.payload();
        match self.opcode {
            Opcode::Read => match *p {
                [sector, block, count] => Ok(Request::Read {
                    sector,
                    block,
                    count,
                }),
                _ => Err(Error::InvalidParameter("read takes sector, block and count")),
            },
            Opcode::Write => match p {
                [sector, block, content @ ..] => Ok(Request::Write {
                    sector: *sector,
                    block: *block,
                    content,
                }),
                _ => Err(Error::InvalidParameter("write takes sector, block and content")),
            },
            Opcode::SetTrailers => Ok(Request::SetTrailers(p)),
            Opcode::ChangeTrailers => Ok(Request::ChangeTrailers(p)),
            Opcode::CheckTrailers => Ok(Request::CheckTrailers),
            Opcode::SelfTest => Ok(Request::SelfTest),
            Opcode::Reset => Ok(Request::Reset),
            Opcode::ToggleMode => Err(Error::InvalidParameter(
                "mode toggle is consumed by the framer",
            )),
        }
    }
}

/// Typed view of a confirmed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Read { sector: u8, block: u8, count: u8 },
    Write { sector: u8, block: u8, content: &'a [u8] },
    SetTrailers(&'a [u8]),
    ChangeTrailers(&'a [u8]),
    CheckTrailers,
    SelfTest,
    Reset,
}
