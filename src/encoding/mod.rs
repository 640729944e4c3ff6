//! # bitbox encoder and decoder
//!
//! Entry points for turning values into host-native bytes and back.
//!
//! # Example
//!
//! ```
//! use bitbox::prelude::*;
//!
//! // a record with an optional field
//! #[derive(Encode, Decode, Default, PartialEq, Debug)]
//! struct Transfer {
//!     chain_id: Option<u64>,
//!     nonce: u64,
//!     memo: String,
//! }
//!
//! let transfer = Transfer {
//!     chain_id: Some(1),
//!     nonce: 42,
//!     memo: "rent".to_string(),
//! };
//!
//! // encode into a reusable buffer
//! let mut buf = Buffer::new();
//! encode(&mut buf, &transfer).unwrap();
//!
//! // flag + chain id, nonce, length prefix + memo
//! assert_eq!(buf.len(), 1 + 8 + 8 + 4 + 4);
//!
//! // and decode it back in place
//! let mut out = Transfer::default();
//! decode(&mut buf, &mut out).unwrap();
//!
//! assert_eq!(out, transfer);
//! ```

use crate::{buffer::Buffer, errors::Error, pod, shape::Shape};
use bytemuck::{NoUninit, Pod};
use log::debug;

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
pub(crate) use constants::*;

/// Encode `value` at the end of `buf`.
///
/// Several values can be encoded in one call with [`encode!`](crate::encode!) or by
/// passing a tuple; they are written back to back with no separators.
///
/// Every `Option` costs a 1-byte presence flag, so a `None` still writes one byte.
///
/// # Errors
///
/// Fails with [`Error::LengthOverflow`] when a length does not fit its prefix. The buffer
/// is then truncated back to where it ended before the call.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// encode(&mut buf, &666u64).unwrap();
///
/// assert_eq!(buf.data(), &666u64.to_ne_bytes());
/// ```
pub fn encode<T: Encode + ?Sized>(buf: &mut Buffer, value: &T) -> Result<(), Error> {
    let end = buf.end();
    if let Err(e) = value.encode(buf) {
        debug!("bitbox: rolling back {} bytes after {}", buf.end() - end, e);
        buf.truncate(end);
        return Err(e);
    }
    Ok(())
}

/// Decode the next value from `d` into `dst`, in place.
///
/// # Errors
///
/// Fails with [`Error::OutOfBounds`] when the input ends early, or
/// [`Error::InvalidValue`] when the bytes do not form a valid value. Bytes consumed
/// before the failure stay consumed.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// encode(&mut buf, "bitbox").unwrap();
///
/// let mut out = String::new();
/// decode(&mut buf, &mut out).unwrap();
///
/// assert_eq!(out, "bitbox");
/// ```
pub fn decode<D: Deserializer, T: Decode + ?Sized>(d: &mut D, dst: &mut T) -> Result<(), Error> {
    let res = dst.decode(d);
    if let Err(e) = &res {
        debug!("bitbox: decode failed with {} bytes left: {}", d.remaining(), e);
    }
    res
}

/// Encodes a value into a fresh [`Buffer`].
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let buf = encode_full(&vec![1u8, 2, 3, 4, 5]).unwrap();
///
/// // 4-byte count, then the bytes
/// assert_eq!(buf.len(), 9);
/// ```
pub fn encode_full<T: Encode + ?Sized>(value: &T) -> Result<Buffer, Error> {
    let mut buf = Buffer::new();
    encode(&mut buf, value)?;
    Ok(buf)
}

/// Decodes a value of type `T` from the front of `bytes`. Trailing bytes are ignored.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let buf = encode_full(&[1u32, 2, 3, 4]).unwrap();
/// let arr: [u32; 4] = decode_full(buf.data()).unwrap();
///
/// assert_eq!(arr, [1, 2, 3, 4]);
/// ```
pub fn decode_full<T: Decode + Default>(mut bytes: &[u8]) -> Result<T, Error> {
    let mut out = T::default();
    decode(&mut bytes, &mut out)?;
    Ok(out)
}

/// Encode `value` as one block of its raw in-memory bytes.
///
/// This is POD mode for a single value: no per-field dispatch, no prefixes. The bound on
/// `T` rules out pointers and padding at compile time.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// #[repr(C)]
/// #[derive(Clone, Copy, Default, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Quote {
///     price: u64,
///     size: u32,
///     venue: u16,
///     flags: u16,
/// }
///
/// let quote = Quote { price: 101, size: 7, venue: 3, flags: 0 };
///
/// let mut buf = Buffer::new();
/// encode_pod(&mut buf, &quote);
/// assert_eq!(buf.len(), 16);
///
/// let mut out = Quote::default();
/// decode_pod(&mut buf, &mut out).unwrap();
/// assert_eq!(out, quote);
/// ```
pub fn encode_pod<T: NoUninit>(buf: &mut Buffer, value: &T) { pod::write_block(value, buf) }

/// Decode one block written by [`encode_pod`] into `dst`.
pub fn decode_pod<D: Deserializer, T: Pod>(d: &mut D, dst: &mut T) -> Result<(), Error> {
    pod::read_block(dst, d)
}

/// Encode `items` as a 4-byte count and one block of their raw in-memory bytes.
///
/// The bytes are the same as encoding a `Vec` of a `#[bitbox(pod)]` struct with the same
/// layout, so a type from another crate can share a stream with derived ones. Inside
/// other values, wrap the vector in [`PodVec`](crate::pod::PodVec).
///
/// # Errors
///
/// Fails with [`Error::LengthOverflow`] when the count does not fit its prefix; nothing
/// is written.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// encode_pod_slice(&mut buf, &[[1u32, 2], [3, 4], [5, 6]]).unwrap();
/// assert_eq!(buf.len(), 4 + 3 * 8);
///
/// let mut out: Vec<[u32; 2]> = Vec::new();
/// decode_pod_vec(&mut buf, &mut out).unwrap();
/// assert_eq!(out, [[1, 2], [3, 4], [5, 6]]);
/// ```
pub fn encode_pod_slice<T: NoUninit>(buf: &mut Buffer, items: &[T]) -> Result<(), Error> {
    buf.put_len(items.len())?;
    pod::write_blocks(items, buf);
    Ok(())
}

/// Decode a run written by [`encode_pod_slice`] into `dst`, replacing its contents.
///
/// The input is checked for the whole run before `dst` is resized.
pub fn decode_pod_vec<D: Deserializer, T: Pod>(d: &mut D, dst: &mut Vec<T>) -> Result<(), Error> {
    let len = d.take_len()?;
    pod::read_block_vec(dst, len, d)
}

/// Encodes any number of values into a [`Buffer`], in order.
///
/// Expands to a single [`encode`](crate::encode) call over a tuple of references, so
/// either every value is written or none is. Accepts up to 12 values.
///
/// Each `Option` value writes a 1-byte presence flag, including `None`.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// bitbox::encode!(&mut buf, 1u8, "two", [3u16; 3]).unwrap();
///
/// assert_eq!(buf.len(), 1 + (4 + 3) + 6);
/// ```
#[macro_export]
macro_rules! encode {
    ($buf:expr, $($value:expr),+ $(,)?) => {
        $crate::encode($buf, &($(&$value,)+))
    };
}

/// Decodes any number of values from a deserializer, in order.
///
/// Stops at the first destination that fails; destinations before it keep their decoded
/// values. Accepts up to 12 destinations.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// bitbox::encode!(&mut buf, 1u8, "two").unwrap();
///
/// let (mut one, mut two) = (0u8, String::new());
/// bitbox::decode!(&mut buf, &mut one, &mut two).unwrap();
///
/// assert_eq!((one, two.as_str()), (1, "two"));
/// ```
#[macro_export]
macro_rules! decode {
    ($buf:expr, $($dst:expr),+ $(,)?) => {
        $crate::decode($buf, &mut ($(&mut *$dst,)+))
    };
}
