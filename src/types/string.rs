//! Codec implementations for strings and raw byte payloads.
//!
//! Both encode as a varint byte-length followed by the raw bytes, with no
//! terminator and no re-encoding. For portability the length must fit in a
//! `u32`. [`Bytes`] shares the wire and fingerprint shape of `Vec<u8>`, so
//! the two are freely interchangeable across encoder and decoder.

use crate::{varint, Cursor, EncodeSize, Error, Fingerprinter, Read, Shape, TypeCode, Write};
use bytes::{BufMut, Bytes};

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        buf.put_slice(self.as_bytes());
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len()) + self.len()
    }
}

impl Read for String {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let bytes = cur.read(len)?;
        let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok(s.to_owned())
    }
}

impl Shape for String {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Str);
    }
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        buf.put_slice(self);
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len()) + self.len()
    }
}

impl Read for Bytes {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        Ok(Bytes::copy_from_slice(cur.read(len)?))
    }
}

impl Shape for Bytes {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::List);
        fp.leaf(TypeCode::U8);
    }
}
