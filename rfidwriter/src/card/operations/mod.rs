pub mod diagnostics;
pub mod read;
pub mod trailer;
pub mod write;

pub use diagnostics::{self_test, sleep};
pub use read::{authenticate, read_block, read_blocks};
pub use trailer::{change_trailers, check_trailers};
pub use write::write_block;
