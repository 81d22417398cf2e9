//! Record traversal: ordered field encode/decode for struct-like types.
//!
//! A record is a value with a fixed, statically known, ordered set of typed
//! fields. The [`Record`] trait is the seam between the codec and whatever
//! enumerates those fields; the [`record!`](crate::record) and
//! [`variants!`](crate::variants) macros generate implementations from a
//! struct or enum definition, walking fields in declaration order exactly as
//! written.
//!
//! # Forward compatibility
//!
//! Field decoding applies one uniform rule: a field whose decode would begin
//! on an already-exhausted cursor is skipped and keeps its default value,
//! and so do all fields after it. A payload encoded from an older record
//! shape (missing trailing fields) therefore decodes cleanly into an
//! extended shape. The rule cascades through nested records; it never
//! applies *inside* a value, where running out of bytes mid-decode is still
//! an [`Error::EndOfBuffer`].

use crate::{Cursor, Error, Shape};
use bytes::BufMut;

/// Trait for types whose fields can be traversed in declaration order.
///
/// Implementations are generated by [`record!`](crate::record); the trait
/// can also be implemented by hand for types the macro cannot express.
/// Encoding walks every field and cannot fail; decoding short-circuits on
/// the first hard error, leaving later fields at their defaults.
pub trait Record: Default + Shape {
    /// The number of fields in this record.
    const FIELD_COUNT: u16;

    /// Writes every field to the buffer, in declaration order.
    fn write_fields(&self, buf: &mut impl BufMut);

    /// Returns the exact number of bytes `write_fields` will produce.
    fn size_fields(&self) -> usize;

    /// Decodes fields in declaration order into `self`.
    ///
    /// On a hard error the already-decoded fields keep their new values,
    /// the failing field and everything after it keep their defaults, and
    /// the error is returned. An exhausted cursor at a field boundary is
    /// not an error (see module docs).
    fn read_fields(&mut self, cur: &mut Cursor<'_>) -> Result<(), Error>;
}

/// Defines a struct and implements the codec traits for it.
///
/// The macro emits the struct definition unchanged, then implements
/// [`Record`], [`Write`](crate::Write), [`EncodeSize`](crate::EncodeSize),
/// [`Read`](crate::Read), and [`Shape`](crate::Shape), all walking the
/// fields in declaration order. The struct must implement `Default` (derive
/// it alongside the usual suspects).
///
/// ```
/// densepack::record! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct Sample {
///         pub id: u64,
///         pub name: String,
///         pub readings: Vec<i32>,
///     }
/// }
///
/// use densepack::{Decode, Encode};
/// let sample = Sample { id: 7, name: "s-7".into(), readings: vec![-1, 1] };
/// let decoded = Sample::decode(&sample.encode()).unwrap();
/// assert_eq!(decoded, sample);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $field:ident : $ftype:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$fattr])*
                $fvis $field: $ftype,
            )*
        }

        impl $crate::Record for $name {
            const FIELD_COUNT: u16 =
                <[&'static str]>::len(&[$(stringify!($field)),*]) as u16;

            #[allow(unused_variables)]
            fn write_fields(&self, buf: &mut impl $crate::bytes::BufMut) {
                $( $crate::Write::write(&self.$field, buf); )*
            }

            fn size_fields(&self) -> usize {
                0 $( + $crate::EncodeSize::encode_size(&self.$field) )*
            }

            #[allow(unused_variables)]
            fn read_fields(
                &mut self,
                cur: &mut $crate::Cursor<'_>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $(
                    if cur.is_exhausted() {
                        return ::core::result::Result::Ok(());
                    }
                    self.$field = $crate::Read::read(cur)?;
                )*
                ::core::result::Result::Ok(())
            }
        }

        impl $crate::Write for $name {
            fn write(&self, buf: &mut impl $crate::bytes::BufMut) {
                $crate::Record::write_fields(self, buf);
            }
        }

        impl $crate::EncodeSize for $name {
            fn encode_size(&self) -> usize {
                $crate::Record::size_fields(self)
            }
        }

        impl $crate::Read for $name {
            fn read(
                cur: &mut $crate::Cursor<'_>,
            ) -> ::core::result::Result<Self, $crate::Error> {
                let mut value = <$name as ::core::default::Default>::default();
                $crate::Record::read_fields(&mut value, cur)?;
                ::core::result::Result::Ok(value)
            }
        }

        impl $crate::Shape for $name {
            #[allow(unused_variables)]
            fn shape(fp: &mut $crate::Fingerprinter) {
                fp.record::<$name>(
                    <$name as $crate::Record>::FIELD_COUNT,
                    ::core::mem::size_of::<$name>() as u16,
                    |fp| {
                        $( <$ftype as $crate::Shape>::shape(fp); )*
                    },
                );
            }
        }
    };
}

/// Defines an enum and implements the codec traits for it.
///
/// Each alternative is either a unit variant or carries exactly one payload
/// type (use a tuple for multiple values). The wire index of every
/// alternative is written explicitly at the definition site and travels as
/// a varint ahead of the payload; decoding an index that matches no
/// alternative fails with [`Error::InvalidVariant`].
///
/// ```
/// densepack::variants! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub enum Reading {
///         #[default]
///         0 => Missing,
///         1 => Celsius(f32),
///         2 => Label(String),
///     }
/// }
///
/// use densepack::{Decode, Encode};
/// let reading = Reading::Celsius(21.5);
/// assert_eq!(Reading::decode(&reading.encode()).unwrap(), reading);
/// ```
#[macro_export]
macro_rules! variants {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vattr:meta])*
                $index:literal => $variant:ident $( ( $payload:ty ) )?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis enum $name {
            $(
                $(#[$vattr])*
                $variant $( ($payload) )?,
            )*
        }

        impl $crate::Write for $name {
            #[allow(irrefutable_let_patterns)]
            fn write(&self, buf: &mut impl $crate::bytes::BufMut) {
                $(
                    $crate::variants!(@write self, buf, $name, $index, $variant $(, $payload)?);
                )*
                unreachable!("variant write fell through");
            }
        }

        impl $crate::EncodeSize for $name {
            #[allow(irrefutable_let_patterns)]
            fn encode_size(&self) -> usize {
                $(
                    $crate::variants!(@size self, $name, $index, $variant $(, $payload)?);
                )*
                unreachable!("variant encode_size fell through");
            }
        }

        impl $crate::Read for $name {
            fn read(
                cur: &mut $crate::Cursor<'_>,
            ) -> ::core::result::Result<Self, $crate::Error> {
                let index: u32 = $crate::varint::read(cur)?;
                $(
                    if index == ($index as u32) {
                        return $crate::variants!(@read cur, $name, $variant $(, $payload)?);
                    }
                )*
                ::core::result::Result::Err($crate::Error::InvalidVariant(index))
            }
        }

        impl $crate::Shape for $name {
            fn shape(fp: &mut $crate::Fingerprinter) {
                fp.arity(
                    $crate::TypeCode::Variant,
                    <[&'static str]>::len(&[$(stringify!($variant)),*]) as u32,
                );
                $(
                    $crate::variants!(@shape fp $(, $payload)?);
                )*
            }
        }
    };

    // Internal rules: one per variant kind, so payload binders stay inside a
    // single expansion.
    (@write $self:expr, $buf:expr, $name:ident, $index:literal, $variant:ident) => {
        if let $name::$variant = $self {
            $crate::varint::write($index as u32, $buf);
            return;
        }
    };
    (@write $self:expr, $buf:expr, $name:ident, $index:literal, $variant:ident, $payload:ty) => {
        if let $name::$variant(value) = $self {
            $crate::varint::write($index as u32, $buf);
            $crate::Write::write(value, $buf);
            return;
        }
    };
    (@size $self:expr, $name:ident, $index:literal, $variant:ident) => {
        if let $name::$variant = $self {
            return $crate::varint::size($index as u32);
        }
    };
    (@size $self:expr, $name:ident, $index:literal, $variant:ident, $payload:ty) => {
        if let $name::$variant(value) = $self {
            return $crate::varint::size($index as u32) + $crate::EncodeSize::encode_size(value);
        }
    };
    (@read $cur:expr, $name:ident, $variant:ident) => {
        ::core::result::Result::Ok($name::$variant)
    };
    (@read $cur:expr, $name:ident, $variant:ident, $payload:ty) => {
        ::core::result::Result::Ok($name::$variant($crate::Read::read($cur)?))
    };
    (@shape $fp:expr) => {
        $fp.leaf($crate::TypeCode::Unit)
    };
    (@shape $fp:expr, $payload:ty) => {
        <$payload as $crate::Shape>::shape($fp)
    };
}
