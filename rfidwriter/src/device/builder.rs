// rfidwriter-rs/rfidwriter/src/device/builder.rs

use crate::card::KeyRing;
use crate::config::WriterConfig;
use crate::device::handle::{Uninitialized, Writer};
use crate::transport::traits::{InputChannel, OutputChannel, Transceiver};
use crate::types::EncodingMode;
use crate::{Error, Result};

/// Helper to construct a Writer with optional configuration.
pub struct WriterBuilder<S, P> {
    serial: Option<S>,
    pcd: Option<P>,
    config: WriterConfig,
}

impl<S, P> WriterBuilder<S, P>
where
    S: InputChannel + OutputChannel,
    P: Transceiver,
{
    pub fn new() -> Self {
        Self {
            serial: None,
            pcd: None,
            config: WriterConfig::default(),
        }
    }

    pub fn with_serial(mut self, serial: S) -> Self {
        self.serial = Some(serial);
        self
    }

    pub fn with_transceiver(mut self, pcd: P) -> Self {
        self.pcd = Some(pcd);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_mode(mut self, mode: EncodingMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    pub fn keys(mut self, keys: KeyRing) -> Self {
        self.config.keys = keys;
        self
    }

    /// Consume the builder and return an uninitialized Writer.
    pub fn build(self) -> Result<Writer<S, P, Uninitialized>> {
        let serial = self
            .serial
            .ok_or(Error::InvalidParameter("no serial channel provided"))?;
        let pcd = self
            .pcd
            .ok_or(Error::InvalidParameter("no transceiver provided"))?;
        Ok(Writer::new(serial, pcd, self.config))
    }
}

impl<S, P> Default for WriterBuilder<S, P>
where
    S: InputChannel + OutputChannel,
    P: Transceiver,
{
    fn default() -> Self {
        Self::new()
    }
}
