//! Compact, schema-free binary serialization.
//!
//! # Overview
//!
//! A binary codec for structured records: values encode to minimal-width
//! byte sequences and decode back without any externally authored schema.
//! Both sides agree on the record definition in source; nothing about the
//! shape travels on the wire unless explicitly requested.
//!
//! - Integers are width-compacted: a `u64` holding `5` costs one byte.
//!   Signed values go through the zig-zag transform so small negatives stay
//!   small.
//! - Containers nest arbitrarily: sequences, fixed arrays, maps, sets,
//!   optionals, tuples, owned pointers, and sum types.
//! - An optional 4-byte structural fingerprint header catches schema drift
//!   between encoder and decoder before any field is touched.
//! - An optional 4-byte CRC-32 trailer catches payload corruption.
//! - Payloads from an older record shape decode into an extended shape,
//!   with the new trailing fields left at their defaults.
//!
//! # Example
//!
//! ```
//! use densepack::Options;
//!
//! densepack::record! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct Telemetry {
//!         pub active: bool,
//!         pub station: String,
//!         pub samples: Vec<i32>,
//!     }
//! }
//!
//! let value = Telemetry {
//!     active: true,
//!     station: "kodiak-3".into(),
//!     samples: vec![-4, 17, 0],
//! };
//!
//! let options = Options::WITH_VERSION | Options::WITH_CHECKSUM;
//! let bytes = densepack::encode_with(&value, options);
//! let decoded: Telemetry = densepack::decode_with(&bytes, options).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! # Manual implementations
//!
//! The macros cover structs and enums; anything else can implement the
//! traits by hand, exactly as the generated code does:
//!
//! ```
//! use bytes::BufMut;
//! use densepack::{Cursor, Decode, Encode, EncodeSize, Error, Read, Write};
//!
//! #[derive(Debug, PartialEq)]
//! struct Window {
//!     start: u64,
//!     len: u32,
//! }
//!
//! impl Write for Window {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.start.write(buf);
//!         self.len.write(buf);
//!     }
//! }
//!
//! impl EncodeSize for Window {
//!     fn encode_size(&self) -> usize {
//!         self.start.encode_size() + self.len.encode_size()
//!     }
//! }
//!
//! impl Read for Window {
//!     fn read(cur: &mut Cursor<'_>) -> Result<Self, Error> {
//!         let start = u64::read(cur)?;
//!         let len = u32::read(cur)?;
//!         Ok(Self { start, len })
//!     }
//! }
//!
//! let window = Window { start: 300, len: 16 };
//! assert_eq!(Window::decode(&window.encode()).unwrap(), window);
//! ```

pub mod codec;
pub mod cursor;
pub mod error;
pub mod fingerprint;
pub mod frame;
pub mod record;
pub mod types;
pub mod varint;

// Buffers are part of the public API surface; re-exported so macro-generated
// code and downstream crates agree on the same `bytes` version.
pub use bytes;

pub use codec::{Decode, Encode, EncodeSize, Read, Write};
pub use cursor::Cursor;
pub use error::Error;
pub use fingerprint::{fingerprint, Fingerprinter, Shape, TypeCode};
pub use frame::{decode, decode_with, encode, encode_with, Options};
pub use record::Record;
