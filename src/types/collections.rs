//! Codec implementations for sequences, fixed arrays, maps, and sets.
//!
//! Dynamically sized containers carry a varint element count followed by
//! their elements in iteration order; map entries are each key immediately
//! followed by its value. Fixed arrays carry no count, their length being
//! part of the type. Nesting recurses to arbitrary depth.
//!
//! Hash-based containers have no stable iteration order, so two encodes of
//! equal maps may differ byte-for-byte; decoding always reproduces the same
//! set of entries.
//!
//! Decode never trusts a count for allocation: capacity hints are clamped
//! to the bytes actually remaining, so a hostile count cannot pre-allocate
//! unbounded memory before the element reads run the cursor out.

use crate::{varint, Cursor, EncodeSize, Error, Fingerprinter, Read, Shape, TypeCode, Write};
use bytes::BufMut;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

// Vec implementation
impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len())
            + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let mut items = Vec::with_capacity(len.min(cur.remaining()));
        for _ in 0..len {
            items.push(T::read(cur)?);
        }
        Ok(items)
    }
}

impl<T: Shape> Shape for Vec<T> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::List);
        T::shape(fp);
    }
}

// Fixed-size array implementation
impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize, const N: usize> EncodeSize for [T; N] {
    #[inline]
    fn encode_size(&self) -> usize {
        self.iter().map(EncodeSize::encode_size).sum()
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read(cur)?);
        }
        // Exactly N elements were pushed, so the conversion cannot fail.
        Ok(items.try_into().unwrap_or_else(|_| unreachable!()))
    }
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    fn shape(fp: &mut Fingerprinter) {
        fp.array(N);
        T::shape(fp);
    }
}

// Map implementations
impl<K: Write, V: Write> Write for HashMap<K, V> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        for (key, value) in self {
            key.write(buf);
            value.write(buf);
        }
    }
}

impl<K: EncodeSize, V: EncodeSize> EncodeSize for HashMap<K, V> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len())
            + self
                .iter()
                .map(|(k, v)| k.encode_size() + v.encode_size())
                .sum::<usize>()
    }
}

impl<K: Read + Eq + Hash, V: Read> Read for HashMap<K, V> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let mut map = HashMap::with_capacity(len.min(cur.remaining()));
        for _ in 0..len {
            let key = K::read(cur)?;
            let value = V::read(cur)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K: Shape, V: Shape> Shape for HashMap<K, V> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Map);
        K::shape(fp);
        V::shape(fp);
    }
}

impl<K: Write, V: Write> Write for BTreeMap<K, V> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        for (key, value) in self {
            key.write(buf);
            value.write(buf);
        }
    }
}

impl<K: EncodeSize, V: EncodeSize> EncodeSize for BTreeMap<K, V> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len())
            + self
                .iter()
                .map(|(k, v)| k.encode_size() + v.encode_size())
                .sum::<usize>()
    }
}

impl<K: Read + Ord, V: Read> Read for BTreeMap<K, V> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let mut map = BTreeMap::new();
        for _ in 0..len {
            let key = K::read(cur)?;
            let value = V::read(cur)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K: Shape, V: Shape> Shape for BTreeMap<K, V> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Map);
        K::shape(fp);
        V::shape(fp);
    }
}

// Set implementations
impl<T: Write> Write for HashSet<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for HashSet<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len())
            + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read + Eq + Hash> Read for HashSet<T> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let mut set = HashSet::with_capacity(len.min(cur.remaining()));
        for _ in 0..len {
            set.insert(T::read(cur)?);
        }
        Ok(set)
    }
}

impl<T: Shape> Shape for HashSet<T> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Set);
        T::shape(fp);
    }
}

impl<T: Write> Write for BTreeSet<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write_length(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for BTreeSet<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::length_size(self.len())
            + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read + Ord> Read for BTreeSet<T> {
    #[inline]
    fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
        let len = varint::read_length(cur)?;
        let mut set = BTreeSet::new();
        for _ in 0..len {
            set.insert(T::read(cur)?);
        }
        Ok(set)
    }
}

impl<T: Shape> Shape for BTreeSet<T> {
    fn shape(fp: &mut Fingerprinter) {
        fp.leaf(TypeCode::Set);
        T::shape(fp);
    }
}
