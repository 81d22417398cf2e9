//! Codec implementations for tuples.
//!
//! Tuples encode as their element payloads in order with no prefix; the
//! arity is part of the type and participates in the fingerprint instead.

use crate::{Cursor, EncodeSize, Error, Fingerprinter, Read, Shape, TypeCode, Write};
use bytes::BufMut;
use paste::paste;

macro_rules! impl_codec_for_tuple {
    ($arity:literal => $($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Write ),*> Write for ( $( [<T $index>], )* ) {
                #[inline]
                fn write(&self, buf: &mut impl BufMut) {
                    $( self.$index.write(buf); )*
                }
            }

            impl<$( [<T $index>]: EncodeSize ),*> EncodeSize for ( $( [<T $index>], )* ) {
                #[inline]
                fn encode_size(&self) -> usize {
                    0 $( + self.$index.encode_size() )*
                }
            }

            impl<$( [<T $index>]: Read ),*> Read for ( $( [<T $index>], )* ) {
                #[inline]
                fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
                    Ok(( $( [<T $index>]::read(cur)?, )* ))
                }
            }

            impl<$( [<T $index>]: Shape ),*> Shape for ( $( [<T $index>], )* ) {
                fn shape(fp: &mut Fingerprinter) {
                    fp.arity(TypeCode::Tuple, $arity);
                    $( [<T $index>]::shape(fp); )*
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(1 => 0);
impl_codec_for_tuple!(2 => 0, 1);
impl_codec_for_tuple!(3 => 0, 1, 2);
impl_codec_for_tuple!(4 => 0, 1, 2, 3);
impl_codec_for_tuple!(5 => 0, 1, 2, 3, 4);
impl_codec_for_tuple!(6 => 0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(7 => 0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(8 => 0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(9 => 0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(10 => 0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(11 => 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(12 => 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
