//! Framed record encoding: optional version header, optional checksum
//! trailer.
//!
//! The wire layout is
//!
//! ```text
//! [fingerprint: u32 LE]?   present iff WITH_VERSION
//! field_0 .. field_{N-1}
//! [crc32: u32 LE]?         present iff WITH_CHECKSUM
//! ```
//!
//! The trailing checksum covers every byte before it, version header
//! included. Zero-field records carry neither header nor trailer even when
//! requested, since there is nothing to version or guard.
//!
//! Frame decoding tolerates trailing bytes after the last field: a payload
//! produced by an extended record shape still decodes into the older shape.
//! The strict, whole-buffer entry point for standalone values is
//! [`Decode::decode`](crate::Decode::decode).

use crate::{fingerprint::fingerprint, Cursor, Error, Record};
use bytes::{BufMut, BytesMut};
use std::ops::{BitOr, BitOrAssign};

/// Frame features, composable with `|`.
///
/// ```
/// use densepack::Options;
///
/// let opts = Options::WITH_VERSION | Options::WITH_CHECKSUM;
/// assert!(opts.has_version());
/// assert!(opts.has_checksum());
/// assert!(!Options::NONE.has_checksum());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options(u8);

impl Options {
    /// Bare fields: no header, no trailer.
    pub const NONE: Options = Options(0);

    /// Prepend the record type's structural fingerprint and verify it
    /// before decoding any field.
    pub const WITH_VERSION: Options = Options(0b01);

    /// Append a CRC-32 of the payload and verify it before decoding any
    /// field.
    pub const WITH_CHECKSUM: Options = Options(0b10);

    /// Returns true if the version header is enabled.
    pub const fn has_version(self) -> bool {
        self.0 & Self::WITH_VERSION.0 != 0
    }

    /// Returns true if the checksum trailer is enabled.
    pub const fn has_checksum(self) -> bool {
        self.0 & Self::WITH_CHECKSUM.0 != 0
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Self) -> Self::Output {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Encodes a record with no header or trailer.
pub fn encode<T: Record>(value: &T) -> BytesMut {
    encode_with(value, Options::NONE)
}

/// Encodes a record with the requested frame features.
///
/// Encoding never fails for well-typed input.
pub fn encode_with<T: Record>(value: &T, options: Options) -> BytesMut {
    let framed = T::FIELD_COUNT > 0;
    let mut size = value.size_fields();
    if framed && options.has_version() {
        size += 4;
    }
    if framed && options.has_checksum() {
        size += 4;
    }

    let mut buf = BytesMut::with_capacity(size);
    if framed && options.has_version() {
        buf.put_u32_le(fingerprint::<T>());
    }
    value.write_fields(&mut buf);
    if framed && options.has_checksum() {
        let crc = crc32fast::hash(&buf);
        buf.put_u32_le(crc);
    }
    buf
}

/// Decodes a record encoded with no header or trailer.
pub fn decode<T: Record>(bytes: &[u8]) -> Result<T, Error> {
    decode_with(bytes, Options::NONE)
}

/// Decodes a record, verifying whatever frame features it was encoded with.
///
/// The options must match the encode side: they are part of the protocol
/// agreement between the two, not discoverable from the bytes.
pub fn decode_with<T: Record>(bytes: &[u8], options: Options) -> Result<T, Error> {
    if bytes.is_empty() {
        return Err(Error::Empty);
    }

    let framed = T::FIELD_COUNT > 0;
    let mut cur = Cursor::new(bytes);

    if framed && options.has_version() {
        if bytes.len() < 4 {
            return Err(Error::ShortFrame(bytes.len()));
        }
        let found = u32::from_le_bytes(cur.read_array()?);
        let expected = fingerprint::<T>();
        if found != expected {
            return Err(Error::VersionMismatch { expected, found });
        }
    }

    if framed && options.has_checksum() {
        if bytes.len() < 4 {
            return Err(Error::ShortFrame(bytes.len()));
        }
        let split = bytes.len() - 4;
        let found = u32::from_le_bytes(bytes[split..].try_into().unwrap());
        let expected = crc32fast::hash(&bytes[..split]);
        if found != expected {
            return Err(Error::ChecksumMismatch { expected, found });
        }
        cur.shrink(4)?;
    }

    let mut value = T::default();
    value.read_fields(&mut cur)?;
    Ok(value)
}
