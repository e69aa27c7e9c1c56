// rfidwriter-rs/rfidwriter/src/device/handle.rs

use std::marker::PhantomData;

use log::debug;

use crate::card::CardSession;
use crate::config::WriterConfig;
use crate::constants::ACK;
use crate::protocol::{
    AckOutcome, CommandFramer, CommandRecord, ConfirmationGate, ConfirmationState, FrameEvent,
    Opcode, Request, Responder,
};
use crate::transport::traits::{InputChannel, OutputChannel, Transceiver};
use crate::types::EncodingMode;
use crate::Result;

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// What one call to [`Writer::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No confirmed command was run
    Idle,
    /// A confirmed command was run and its result reported
    Executed(Opcode),
    /// The host confirmed a reset; the platform should restart the writer
    ResetRequested,
}

/// Serial command processor driving one reader.
///
/// `S` is the serial link, `P` the reader chip. The start-up banner has to
/// be sent before commands are accepted, which the type state enforces.
pub struct Writer<S, P, State = Uninitialized> {
    serial: S,
    pcd: P,
    config: WriterConfig,
    framer: CommandFramer,
    gate: ConfirmationGate,
    session: CardSession,
    _state: PhantomData<State>,
}

impl<S, P, State> Writer<S, P, State> {
    pub fn mode(&self) -> EncodingMode {
        self.framer.mode()
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn session(&self) -> &CardSession {
        &self.session
    }

    pub fn confirmation_state(&self) -> ConfirmationState {
        self.gate.state()
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn transceiver(&self) -> &P {
        &self.pcd
    }

    pub fn transceiver_mut(&mut self) -> &mut P {
        &mut self.pcd
    }

    pub fn into_parts(self) -> (S, P) {
        (self.serial, self.pcd)
    }
}

impl<S, P> Writer<S, P, Uninitialized>
where
    S: InputChannel + OutputChannel,
    P: Transceiver,
{
    pub fn new(serial: S, pcd: P, config: WriterConfig) -> Self {
        Self {
            serial,
            pcd,
            framer: CommandFramer::new(config.initial_mode),
            gate: ConfirmationGate::new(),
            session: CardSession::new(config.keys),
            config,
            _state: PhantomData,
        }
    }

    /// Reset the reader chip and send the start-up banner.
    pub fn initialize(mut self) -> Result<Writer<S, P, Initialized>> {
        self.pcd.reset();
        Responder::new(&mut self.serial, self.framer.mode()).announce(&self.config.version)?;
        debug!("writer initialized in {} mode", self.framer.mode());

        Ok(Writer {
            serial: self.serial,
            pcd: self.pcd,
            config: self.config,
            framer: self.framer,
            gate: self.gate,
            session: self.session,
            _state: PhantomData,
        })
    }
}

impl<S, P> Writer<S, P, Initialized>
where
    S: InputChannel + OutputChannel,
    P: Transceiver,
{
    /// One pass of the main loop: serial input, card presence, then the
    /// confirmed command if there is one.
    ///
    /// Card and protocol failures are reported on the serial link; only a
    /// failing output channel is returned as an error.
    pub fn poll(&mut self) -> Result<PollOutcome> {
        let confirmed = self.service_input()?;

        if let Some(event) = self.session.refresh(&mut self.pcd) {
            Responder::new(&mut self.serial, self.framer.mode()).card_event(&event)?;
        }

        match confirmed {
            Some(record) => self.execute(record),
            None => Ok(PollOutcome::Idle),
        }
    }

    /// Restore the start-up state without restarting the process and send
    /// the banner again.
    pub fn soft_reset(&mut self) -> Result<()> {
        self.framer.reset_to(self.config.initial_mode);
        self.gate.reset();
        self.session = CardSession::new(self.config.keys);
        self.pcd.reset();
        debug!("soft reset");
        Responder::new(&mut self.serial, self.framer.mode()).announce(&self.config.version)
    }

    /// Read available input until a command is confirmed, the input runs
    /// dry, or an error forces a resync.
    fn service_input(&mut self) -> Result<Option<CommandRecord>> {
        loop {
            if self.gate.is_awaiting_ack() {
                // the reply is only taken as a whole
                if self.serial.available() < 3 {
                    return Ok(None);
                }
                let (Some(marker), Some(cr), Some(lf)) = (
                    self.serial.read_byte(),
                    self.serial.read_byte(),
                    self.serial.read_byte(),
                ) else {
                    return Ok(None);
                };
                match self.gate.on_ack_bytes(marker, cr, lf) {
                    AckOutcome::Execute(record) => return Ok(Some(record)),
                    AckOutcome::Discarded => continue,
                    AckOutcome::Rejected(err) => {
                        Responder::new(&mut self.serial, self.framer.mode()).failure(&err)?;
                        self.drain_input();
                        return Ok(None);
                    }
                }
            }

            let Some(byte) = self.serial.read_byte() else {
                return Ok(None);
            };
            match self.framer.feed(byte) {
                FrameEvent::Incomplete => {}
                FrameEvent::Framed(record) => {
                    let mut out = Responder::new(&mut self.serial, self.framer.mode());
                    self.gate.on_framed(record, &mut out)?;
                }
                FrameEvent::ModeToggled(mode) => {
                    Responder::new(&mut self.serial, mode).mode_toggled(mode)?;
                }
                FrameEvent::FramingError(err) => {
                    Responder::new(&mut self.serial, self.framer.mode()).failure(&err)?;
                    self.drain_input();
                    return Ok(None);
                }
            }
        }
    }

    fn drain_input(&mut self) {
        let mut dropped = 0usize;
        while self.serial.available() > 0 && self.serial.read_byte().is_some() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!("dropped {} pending input byte(s)", dropped);
        }
    }

    fn execute(&mut self, record: CommandRecord) -> Result<PollOutcome> {
        let opcode = record.opcode();
        debug!("executing {:?}", opcode);
        let mut out = Responder::new(&mut self.serial, self.framer.mode());

        let result = match record.request() {
            Ok(Request::Reset) => return Ok(PollOutcome::ResetRequested),
            Ok(Request::Read {
                sector,
                block,
                count,
            }) => self
                .session
                .read(&mut self.pcd, sector, block, count, |_, data| out.block(data))
                .and_then(|()| out.ack()),
            Ok(Request::Write {
                sector,
                block,
                content,
            }) => self
                .session
                .write(&mut self.pcd, sector, block, content)
                .and_then(|()| out.ack()),
            Ok(Request::SetTrailers(payload)) => self
                .session
                .set_trailers(payload)
                .and_then(|()| out.ack()),
            Ok(Request::ChangeTrailers(payload)) => self
                .session
                .change_trailers(&mut self.pcd, payload, |_| out.partial(ACK))
                .and_then(|()| out.ack()),
            Ok(Request::CheckTrailers) => {
                let audit = self.session.check_trailers(&mut self.pcd);
                out.audit(&audit)
            }
            Ok(Request::SelfTest) => self
                .session
                .self_test(&mut self.pcd)
                .and_then(|passed| out.verdict(passed)),
            Err(e) => Err(e),
        };

        if let Err(err) = result {
            out.failure(&err)?;
        }
        self.session.sleep(&mut self.pcd);
        Ok(PollOutcome::Executed(opcode))
    }
}
