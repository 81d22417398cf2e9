//! Core codec traits and implementations

use crate::{Cursor, Error};
use bytes::{BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough
    /// capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know their exact encoded length.
pub trait EncodeSize {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be
    /// written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected
    /// number of bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> BytesMut {
        let size = self.encode_size();
        let mut buf = BytesMut::with_capacity(size);
        self.write(&mut buf);
        assert_eq!(buf.len(), size, "write() did not write expected bytes");
        buf
    }
}

// Automatically implement `Encode` for types that implement `Write` and
// `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be read/decoded from a cursor.
pub trait Read: Sized {
    /// Reads a value from the cursor, consuming the necessary bytes.
    ///
    /// Returns an error if decoding fails (e.g., invalid data, not enough
    /// bytes).
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error>;
}

/// Trait for types that can be decoded from a buffer, ensuring the entire
/// buffer is consumed.
///
/// This is the strict, value-level entry point: trailing bytes are an
/// error. Framed record decoding ([`crate::frame::decode_with`]) instead
/// tolerates trailing bytes for compatibility with extended record shapes.
pub trait Decode: Read {
    /// Decodes a value from a buffer, ensuring the buffer is fully
    /// consumed.
    ///
    /// (Provided method).
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let mut cur = Cursor::new(bytes);
        let value = Self::read(&mut cur)?;
        match cur.remaining() {
            0 => Ok(value),
            extra => Err(Error::ExtraData(extra)),
        }
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_buffer() {
        assert_eq!(u64::decode(&[0x80]), Err(Error::EndOfBuffer));
    }

    #[test]
    fn test_extra_data() {
        assert_eq!(u8::decode(&[0x01, 0x02]), Err(Error::ExtraData(1)));
    }

    #[test]
    fn test_encode_matches_size() {
        let value = 300u32;
        let encoded = value.encode();
        assert_eq!(encoded.len(), value.encode_size());
        assert_eq!(u32::decode(&encoded).unwrap(), value);
    }
}
