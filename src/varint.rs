//! Variable-length integer encoding and decoding
//!
//! This module implements LEB128-style variable-length integers: each byte
//! carries 7 bits of data in its low bits, and the high bit signals that
//! more bytes follow. Groups are emitted least-significant first. A value
//! declared at 16, 32, or 64 bits therefore occupies only as many bytes as
//! its magnitude requires, and the decoder reconstructs the exact value
//! without any width tag on the wire.
//!
//! Signed integers are first mapped through the zig-zag transform
//! (`n >= 0 -> 2n`, `n < 0 -> 2|n| - 1`) so that small-magnitude negative
//! values stay small instead of expanding to full width.
//!
//! `usize` and `isize` are not wire types: lengths travel as `u32` varints
//! to keep the format identical across architectures.

use crate::{Cursor, Error};
use bytes::BufMut;
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);

/// A trait for signed integers that convert to and from the unsigned
/// integer of the same width via the zig-zag transform.
pub trait SInt<UEq: UInt> {
    /// Converts the signed integer to its zig-zag unsigned form.
    fn as_zigzag(&self) -> UEq;

    /// Converts a zig-zag unsigned integer back to its signed form.
    fn un_zigzag(value: UEq) -> Self;
}

macro_rules! impl_sint {
    ($type:ty, $utype:ty) => {
        impl SInt<$utype> for $type {
            #[inline]
            fn as_zigzag(&self) -> $utype {
                let shr = std::mem::size_of::<$utype>() * 8 - 1;
                ((self << 1) ^ (self >> shr)) as $utype
            }

            #[inline]
            fn un_zigzag(value: $utype) -> Self {
                ((value >> 1) as $type) ^ (-((value & 1) as $type))
            }
        }
    };
}
impl_sint!(i16, u16);
impl_sint!(i32, u32);
impl_sint!(i64, u64);

/// Encodes an unsigned integer as a varint.
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) {
    let continuation_threshold = T::from(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for lengths).
        // `as_u8()` does not truncate the value or leave a continuation bit.
        buf.put_u8(value.as_u8());
        return;
    }

    let mut val = value;
    while val >= continuation_threshold {
        buf.put_u8(val.as_u8() | CONTINUATION_BIT_MASK);
        val >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(val.as_u8());
}

/// Decodes an unsigned integer from a varint.
///
/// A chain whose continuation bits run off the end of the input fails with
/// [`Error::EndOfBuffer`]; a chain carrying set bits beyond the width of `T`
/// fails with [`Error::InvalidVarint`].
pub fn read<T: UInt>(cur: &mut Cursor) -> Result<T, Error> {
    let max_bits = std::mem::size_of::<T>() * 8;
    let mut result: T = T::from(0);
    let mut shift = 0;

    loop {
        let byte = cur.read_u8()?;

        // Once fewer than 7 bits of capacity remain, any byte carrying more
        // significant bits than fit (the continuation bit included, since it
        // is the most-significant bit) makes the encoding invalid for T.
        let remaining_bits = max_bits - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Error::InvalidVarint);
            }
        }

        result |= T::from(byte & DATA_BITS_MASK) << shift;

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }

        shift += DATA_BITS_PER_BYTE;
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a
/// varint.
pub fn size<T: UInt>(value: T) -> usize {
    let total_bits = std::mem::size_of::<T>() * 8;
    let data_bits = total_bits - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// Encodes a signed integer as a zig-zag varint.
pub fn write_signed<U: UInt, S: SInt<U>>(value: S, buf: &mut impl BufMut) {
    write(value.as_zigzag(), buf);
}

/// Decodes a signed integer from a zig-zag varint.
pub fn read_signed<U: UInt, S: SInt<U>>(cur: &mut Cursor) -> Result<S, Error> {
    Ok(S::un_zigzag(read(cur)?))
}

/// Calculates the number of bytes needed to encode a signed integer as a
/// zig-zag varint.
pub fn size_signed<U: UInt, S: SInt<U>>(value: S) -> usize {
    size(value.as_zigzag())
}

/// Encodes a collection or string length.
///
/// Lengths are capped at `u32::MAX` so the on-wire format is identical
/// across 32-bit and 64-bit architectures.
pub fn write_length(len: usize, buf: &mut impl BufMut) {
    let len = u32::try_from(len).expect("length exceeds u32");
    write(len, buf);
}

/// Decodes a collection or string length.
pub fn read_length(cur: &mut Cursor) -> Result<usize, Error> {
    let len: u32 = read(cur)?;
    Ok(len as usize)
}

/// Calculates the number of bytes needed to encode a length.
pub fn length_size(len: usize) -> usize {
    let len = u32::try_from(len).expect("length exceeds u32");
    size(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write(value, &mut buf);
            assert_eq!(buf.len(), size(value));

            let mut cur = Cursor::new(&buf);
            let decoded: u64 = read(&mut cur).unwrap();
            assert_eq!(decoded, value);
            assert!(cur.is_exhausted());
        }
    }

    #[test]
    fn test_varint_conformity() {
        let mut buf = Vec::new();
        write(0u32, &mut buf);
        assert_eq!(buf, [0x00]);

        let mut buf = Vec::new();
        write(127u32, &mut buf);
        assert_eq!(buf, [0x7F]);

        let mut buf = Vec::new();
        write(128u32, &mut buf);
        assert_eq!(buf, [0x80, 0x01]);

        let mut buf = Vec::new();
        write(300u32, &mut buf);
        assert_eq!(buf, [0xAC, 0x02]);

        let mut buf = Vec::new();
        write(u16::MAX, &mut buf);
        assert_eq!(buf, [0xFF, 0xFF, 0x03]);
    }

    #[test]
    fn test_zigzag_encoding() {
        let test_cases = [
            0i64,
            1,
            -1,
            2,
            -2,
            127,
            -127,
            128,
            -128,
            129,
            -129,
            0x7FFFFFFF,
            -0x7FFFFFFF,
            i64::MIN,
            i64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write_signed(value, &mut buf);
            assert_eq!(buf.len(), size_signed(value));

            let mut cur = Cursor::new(&buf);
            let decoded: i64 = read_signed(&mut cur).unwrap();
            assert_eq!(decoded, value);
            assert!(cur.is_exhausted());
        }
    }

    #[test]
    fn test_zigzag_keeps_small_negatives_small() {
        for value in [-1i64, -64, 63] {
            assert_eq!(size_signed(value), 1);
        }
        for value in [-65i64, 64, -8192, 8191] {
            assert!(size_signed(value) <= 2);
        }
    }

    #[test]
    fn test_varint_truncated() {
        let mut cur = Cursor::new(&[0x80]);
        assert_eq!(read::<u64>(&mut cur), Err(Error::EndOfBuffer));
    }

    #[test]
    fn test_varint_overflow() {
        // 11 bytes of continuation overflow a u64.
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02];
        let mut cur = Cursor::new(&bytes);
        assert_eq!(read::<u64>(&mut cur), Err(Error::InvalidVarint));

        // A three-byte chain whose third group exceeds u16.
        let mut cur = Cursor::new(&[0xFF, 0xFF, 0x04]);
        assert_eq!(read::<u16>(&mut cur), Err(Error::InvalidVarint));
    }

    #[test]
    fn test_overlong_varint_rejected_not_panicking() {
        // An unterminated chain longer than any u32 never reads past the
        // point where the width is exhausted.
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        let mut cur = Cursor::new(&bytes);
        assert_eq!(read::<u32>(&mut cur), Err(Error::InvalidVarint));
    }

    #[test]
    fn test_length_round_trip() {
        for len in [0usize, 1, 127, 128, 300, u32::MAX as usize] {
            let mut buf = Vec::new();
            write_length(len, &mut buf);
            assert_eq!(buf.len(), length_size(len));

            let mut cur = Cursor::new(&buf);
            assert_eq!(read_length(&mut cur).unwrap(), len);
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "length exceeds u32")]
    fn test_length_exceeds_u32() {
        let mut buf = Vec::new();
        write_length(usize::MAX, &mut buf);
    }
}
