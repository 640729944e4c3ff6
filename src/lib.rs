//! # bitbox
//!
//! bitbox is a compact binary codec for hot-path serialization. Values are written in their
//! host-native layout with no type tags, no field names and no versioning: the decoder must
//! know the exact shape the encoder used.
//!
//! # Usage
//!
//! The traits [`Encode`] and [`Decode`] describe how a type crosses the wire. They are
//! implemented for scalars, strings, byte containers, slices, arrays, options, pointers
//! and tuples, and can be derived for structs.
//!
//! ```
//! use bitbox::prelude::*;
//!
//! #[derive(Encode, Decode, Default, Debug, PartialEq)]
//! struct Order {
//!     id: u64,
//!     limit: Option<u64>,
//!     tags: Vec<String>,
//! }
//!
//! let order = Order {
//!     id: 7,
//!     limit: None,
//!     tags: vec!["ioc".to_string()],
//! };
//!
//! let mut buf = Buffer::new();
//! encode(&mut buf, &order).unwrap();
//!
//! let mut out = Order::default();
//! decode(&mut buf, &mut out).unwrap();
//!
//! assert_eq!(out, order);
//! ```
//!
//! A [`Buffer`] is meant to be reused: [`Buffer::clear`] drops its contents but keeps the
//! allocation, and decoding overwrites destinations in place, so a steady-state
//! encode/decode loop does not allocate.
//!
//! # Wire format
//!
//! All multi-byte values are in host byte order.
//!
//! | Shape | Layout |
//! |---|---|
//! | scalar | its raw in-memory bytes |
//! | string, bytes | 4-byte length, then the bytes |
//! | array | each element, no prefix |
//! | slice, `Vec` | 4-byte element count, then each element |
//! | `Option<T>` | 1-byte flag (`0` absent), then the payload if present |
//! | struct, tuple | each field in declaration order |
//! | POD struct | its raw in-memory bytes |
//!
//! Slices and arrays of fixed-size elements are copied as one block.
//!
//! ## POD mode
//!
//! Structs that implement [`bytemuck::Pod`] can be marked `#[bitbox(pod)]`, which writes
//! the whole struct as one block instead of field by field:
//!
//! ```
//! use bitbox::prelude::*;
//!
//! #[repr(C)]
//! #[derive(Encode, Decode, Clone, Copy, Default, Debug, PartialEq)]
//! #[derive(bytemuck::Pod, bytemuck::Zeroable)]
//! #[bitbox(pod)]
//! struct Tick {
//!     price: u64,
//!     size: u32,
//!     venue: u32,
//! }
//!
//! let ticks = vec![Tick { price: 100, size: 1, venue: 2 }; 3];
//! let buf = encode_full(&ticks).unwrap();
//!
//! // count, then three 16-byte blocks
//! assert_eq!(buf.len(), 4 + 3 * 16);
//! assert_eq!(decode_full::<Vec<Tick>>(buf.data()).unwrap(), ticks);
//! ```
//!
//! # Features
//!
//! - `derive` (default): `#[derive(Encode, Decode)]`.
//! - `half` (default): `half::f16` and `half::bf16` scalars.
//! - `smallvec` (default): `SmallVec` encodes like a `Vec`.

#![warn(missing_docs)]

mod buffer;
mod composite;
pub mod encoding;
mod errors;
pub mod pod;
pub mod prelude;
mod scalar;
mod shape;
mod varlen;

pub use buffer::Buffer;
pub use encoding::{
    decode, decode_full, decode_pod, decode_pod_vec, encode, encode_full, encode_pod, encode_pod_slice, Decode,
    Deserializer, DeserializerExt, Encode, Serializer, SerializerExt,
};
pub use errors::{Error, Result};
pub use scalar::{Complex32, Complex64};
pub use shape::Shape;

#[cfg(feature = "derive")]
pub use bitbox_derive::{Decode, Encode};
