//! The encoding half: byte sinks and the [`Encode`] trait.

use super::*;
use bytemuck::NoUninit;
use bytes::BytesMut;

/// A sink for encoded bytes.
pub trait Serializer {
    /// Add a byte to the output.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output.
    fn put_slice(&mut self, slice: &[u8]);
}

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add the raw in-memory bytes of `t`, in host order.
    ///
    /// # Arguments
    ///
    /// * `t: &T` - The value to be added.
    #[inline]
    fn put_pod<T: NoUninit>(&mut self, t: &T) { self.put_slice(bytemuck::bytes_of(t)) }

    /// Add a 4-byte length or element-count prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthOverflow`] when `len` does not fit in 32 bits. Nothing is
    /// written in that case.
    #[inline]
    fn put_len(&mut self, len: usize) -> Result<(), Error> {
        if len > MAX_LEN {
            return Err(Error::LengthOverflow(len));
        }
        self.put_pod(&(len as u32));
        Ok(())
    }

    /// Add a length-prefixed byte string.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The bytes to be added.
    #[inline]
    fn put_bytes(&mut self, b: &[u8]) -> Result<(), Error> {
        self.put_len(b.len())?;
        self.put_slice(b);
        Ok(())
    }

    /// Add a presence flag.
    #[inline]
    fn put_flag(&mut self, present: bool) {
        self.put_u8(if present { FLAG_PRESENT } else { FLAG_ABSENT })
    }
}

impl<S: Serializer + ?Sized> SerializerExt for S {}

impl Serializer for Vec<u8> {
    #[inline]
    fn put_u8(&mut self, u: u8) { self.push(u) }

    #[inline]
    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }
}

impl Serializer for BytesMut {
    #[inline]
    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    #[inline]
    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }
}

/// A value that can be encoded.
///
/// Implemented for scalars, strings, byte containers, slices, arrays, options, pointers
/// and tuples. Structs get it through `#[derive(Encode)]`.
pub trait Encode {
    /// How values of this type are laid out on the wire.
    const SHAPE: Shape;

    /// Write `self` to `s`.
    ///
    /// # Errors
    ///
    /// Fails only when a length does not fit its 4-byte prefix.
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error>;

    /// Write a run of values without a prefix.
    ///
    /// Fixed-layout types override this to write the whole run as one block.
    #[doc(hidden)]
    #[inline]
    fn encode_slice<S: Serializer>(items: &[Self], s: &mut S) -> Result<(), Error>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(s)?;
        }
        Ok(())
    }
}
