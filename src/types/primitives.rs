//! Codec implementations for Rust primitive types.
//!
//! # Width compaction
//!
//! `u8` and `i8` occupy one raw byte. The wider integer classes are varint
//! compacted: the declared width bounds what the decoder accepts, while the
//! wire carries only as many 7-bit groups as the value needs. Signed types
//! go through the zig-zag transform first so small negatives stay small.
//!
//! Floats are written as fixed 4/8 little-endian IEEE-754 bytes and are
//! never compacted. Bools are strict: only `0` and `1` decode.

use crate::{varint, Cursor, EncodeSize, Error, Fingerprinter, Read, Shape, TypeCode, Write};
use bytes::BufMut;

// Raw single-byte integers.
impl Write for u8 {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(*self);
    }
}

impl EncodeSize for u8 {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }
}

impl Read for u8 {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        cur.read_u8()
    }
}

impl Shape for u8 {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::U8);
    }
}

impl Write for i8 {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_i8(*self);
    }
}

impl EncodeSize for i8 {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }
}

impl Read for i8 {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(cur.read_u8()? as i8)
    }
}

impl Shape for i8 {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::I8);
    }
}

// Varint-compacted unsigned integers.
macro_rules! impl_uint {
    ($type:ty, $code:expr) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                varint::write(*self, buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                varint::size(*self)
            }
        }

        impl Read for $type {
            #[inline]
            fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
                varint::read(cur)
            }
        }

        impl Shape for $type {
            fn shape(fp: &mut Fingerprinter) {
                fp.leaf($code);
            }
        }
    };
}
impl_uint!(u16, TypeCode::U16);
impl_uint!(u32, TypeCode::U32);
impl_uint!(u64, TypeCode::U64);

// Zig-zag varint signed integers.
macro_rules! impl_sint {
    ($type:ty, $utype:ty, $code:expr) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                varint::write_signed::<$utype, $type>(*self, buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                varint::size_signed::<$utype, $type>(*self)
            }
        }

        impl Read for $type {
            #[inline]
            fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
                varint::read_signed::<$utype, $type>(cur)
            }
        }

        impl Shape for $type {
            fn shape(fp: &mut Fingerprinter) {
                fp.leaf($code);
            }
        }
    };
}
impl_sint!(i16, u16, TypeCode::I16);
impl_sint!(i32, u32, TypeCode::I32);
impl_sint!(i64, u64, TypeCode::I64);

// Fixed-width little-endian floats.
macro_rules! impl_float {
    ($type:ty, $put_method:ident, $code:expr) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$put_method(*self);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                std::mem::size_of::<$type>()
            }
        }

        impl Read for $type {
            #[inline]
            fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
                Ok(<$type>::from_le_bytes(cur.read_array()?))
            }
        }

        impl Shape for $type {
            fn shape(fp: &mut Fingerprinter) {
                fp.leaf($code);
            }
        }
    };
}
impl_float!(f32, put_f32_le, TypeCode::F32);
impl_float!(f64, put_f64_le, TypeCode::F64);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(if *self { 1 } else { 0 });
    }
}

impl EncodeSize for bool {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }
}

impl Read for bool {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        match cur.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

impl Shape for bool {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Bool);
    }
}

// Option implementation
impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.is_some().write(buf);
        if let Some(inner) = self {
            inner.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.encode_size(),
            None => 1,
        }
    }
}

impl<T: Read> Read for Option<T> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        if bool::read(cur)? {
            Ok(Some(T::read(cur)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Shape> Shape for Option<T> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Option);
        T::shape(fp);
    }
}

// Box is byte-transparent: `Option<Box<T>>` therefore reproduces the
// nullable owned-pointer layout (presence byte, allocate on decode).
impl<T: Write> Write for Box<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_ref().write(buf);
    }
}

impl<T: EncodeSize> EncodeSize for Box<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_ref().encode_size()
    }
}

impl<T: Read> Read for Box<T> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Box::new(T::read(cur)?))
    }
}

impl<T: Shape> Shape for Box<T> {
    fn shape(fp: &mut Fingerprinter) {
        T::shape(fp);
    }
}
