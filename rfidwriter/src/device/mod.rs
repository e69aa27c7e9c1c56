// rfidwriter-rs/rfidwriter/src/device/mod.rs

pub mod builder;
pub mod handle;

pub use builder::WriterBuilder;
pub use handle::{Initialized, PollOutcome, Uninitialized, Writer};
