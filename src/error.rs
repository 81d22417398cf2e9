//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every decode failure is surfaced through this enum; nothing panics on
/// untrusted input. Encoding cannot fail for well-typed values and has no
/// error taxonomy of its own.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("empty input")]
    Empty,
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("frame too short for header or trailer: {0} bytes")]
    ShortFrame(usize),
    #[error("fingerprint mismatch: expected {expected:#010x}, found {found:#010x}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("checksum mismatch: expected {expected:#010x}, found {found:#010x}")]
    ChecksumMismatch { expected: u32, found: u32 },
    #[error("invalid variant index: {0}")]
    InvalidVariant(u32),
    #[error("invalid varint")]
    InvalidVarint,
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid utf-8")]
    InvalidUtf8,
}
