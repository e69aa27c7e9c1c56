// rfidwriter-rs/rfidwriter/src/protocol/gate.rs

use log::debug;

use crate::constants::{ACK, CR, LF, NACK};
use crate::protocol::command::CommandRecord;
use crate::protocol::response::Responder;
use crate::{Error, Result};

/// Where the confirm-before-execute handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    /// New command bytes are accepted
    #[default]
    Idle,
    /// A command was framed and is being echoed
    CommandPending,
    /// The echo went out; only an ACK/NACK reply is accepted
    AwaitingAck,
}

/// What the host's three-byte reply decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckOutcome {
    /// ACK: run the command now
    Execute(CommandRecord),
    /// NACK: the command is dropped without running
    Discarded,
    /// Anything else: the command is dropped and the reply is rejected
    Rejected(Error),
}

/// Holds a framed command until the host confirms the echo.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    state: ConfirmationState,
    pending: Option<CommandRecord>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn pending(&self) -> Option<&CommandRecord> {
        self.pending.as_ref()
    }

    pub fn is_awaiting_ack(&self) -> bool {
        self.state == ConfirmationState::AwaitingAck
    }

    /// Echo the command and start waiting for the host's reply.
    pub fn on_framed(&mut self, record: CommandRecord, out: &mut Responder<'_>) -> Result<()> {
        self.pending = Some(record);
        self.state = ConfirmationState::CommandPending;
        if let Err(e) = out.echo(&record) {
            self.reset();
            return Err(e);
        }
        self.state = ConfirmationState::AwaitingAck;
        debug!("echoed {:?}, awaiting ack", record.opcode());
        Ok(())
    }

    /// Consume the host's reply: a marker followed by CR LF.
    pub fn on_ack_bytes(&mut self, marker: u8, cr: u8, lf: u8) -> AckOutcome {
        let pending = self.pending.take();
        self.state = ConfirmationState::Idle;

        let Some(record) = pending else {
            debug!("ack bytes without a pending command");
            return AckOutcome::Discarded;
        };

        if cr != CR || lf != LF || (marker != ACK && marker != NACK) {
            debug!("malformed reply for {:?}, command dropped", record.opcode());
            return AckOutcome::Rejected(Error::MalformedAck {
                bytes: [marker, cr, lf],
            });
        }

        if marker == ACK {
            debug!("{:?} acknowledged", record.opcode());
            AckOutcome::Execute(record)
        } else {
            debug!("{:?} not acknowledged, dropped", record.opcode());
            AckOutcome::Discarded
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.state = ConfirmationState::Idle;
    }
}
