// rfidwriter-rs/rfidwriter/src/constants.rs
//! Wire protocol constants shared by the framer, the gate and the responder

/// Read card (1 byte: sector, 1 byte: block, 1 byte: number of blocks)
pub const CMD_READ: u8 = b'R';
/// Write card (1 byte: sector, 1 byte: block, 16 byte: content), never trailers
pub const CMD_WRITE: u8 = b'W';
/// Switch trailers/keys to use (6 byte key A, 4 byte access, 6 byte key B,
/// 1 byte 'A' or 'B' for the key selection)
pub const CMD_SET_TRAILERS: u8 = b'T';
/// Write a new trailer to every sector, same parameters as `T`
pub const CMD_CHANGE_TRAILERS: u8 = b't';
/// Audit all sector trailers against the local access bytes
pub const CMD_CHECK_TRAILERS: u8 = b'C';
/// Self-test of the reader chip
pub const CMD_SELF_TEST: u8 = b'S';
/// Reset and reboot
pub const CMD_RESET: u8 = b'X';
/// Toggle between byte mode and text (hex) mode
pub const CMD_TOGGLE_MODE: u8 = b'b';

/// Every opcode the framer accepts.
pub const RECEIVE_CMDS: &[u8] = b"RWTtCSXb";

/// Host confirms an echoed command / operation succeeded
pub const ACK: u8 = b'A';
/// Host rejects an echoed command / operation failed
pub const NACK: u8 = b'N';

/// Comment line (verbose info, only for direct user communication)
pub const COMMENT: u8 = b'#';
/// Initialization complete
pub const INIT_COMPLETE: u8 = b'I';
/// Card detected (4/7/10 byte uid) or removed (no uid)
pub const CARD_CHANGED: u8 = b'C';
/// Partial result of a read / trailer operation
pub const PARTIAL_RESULT: u8 = b'P';
/// Echo of a received command, waiting for ACK/NACK
pub const ERROR_CHECK: u8 = b'E';
/// Authentication failed
pub const AUTH_FAILED: u8 = b'x';
/// Invalid command or invalid reply
pub const INVALID_COMMAND: u8 = b'X';

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const LINE_END: &[u8] = b"\r\n";

/// Bytes of one MIFARE block
pub const BLOCK_SIZE: usize = 16;
/// Block plus CRC_A as returned by a MIFARE read
pub const READ_BUFFER_SIZE: usize = BLOCK_SIZE + 2;
/// Opcode + one block + two parameter bytes
pub const MAX_CMD_LEN: usize = 1 + BLOCK_SIZE + 2;
pub const MAX_PAYLOAD_LEN: usize = MAX_CMD_LEN - 1;

pub const SECTOR_COUNT: u8 = 16;
pub const BLOCKS_PER_SECTOR: u8 = 4;
/// Highest addressable absolute block
pub const LAST_BLOCK: u8 = SECTOR_COUNT * BLOCKS_PER_SECTOR - 1;
/// Index of the trailer inside a sector
pub const TRAILER_BLOCK: u8 = BLOCKS_PER_SECTOR - 1;

pub const KEY_SIZE: usize = 6;
pub const ACCESS_BITS_SIZE: usize = 4;
/// Key A + access bytes + key B + key selector
pub const TRAILER_PAYLOAD_LEN: usize = BLOCK_SIZE + 1;

pub const KEY_A_CHAR: u8 = b'A';
pub const KEY_B_CHAR: u8 = b'B';

/// VersionReg values of reader chips that support the self-test
pub const SELF_TEST_VERSIONS: [u8; 4] = [0x88, 0x90, 0x91, 0x92];
