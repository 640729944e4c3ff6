//! The decoding half: byte sources and the [`Decode`] trait.

use super::*;
use bytemuck::AnyBitPattern;

/// A source of encoded bytes.
pub trait Deserializer {
    /// Number of bytes left to read.
    fn remaining(&self) -> usize;

    /// Takes the next `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if fewer than `n` bytes remain, consuming nothing.
    fn take(&mut self, n: usize) -> Result<&[u8], Error>;
}

/// Convenience methods for [`Deserializer`].
pub trait DeserializerExt: Deserializer {
    /// Fails with [`Error::OutOfBounds`] unless at least `n` bytes remain.
    #[inline]
    fn ensure(&self, n: usize) -> Result<(), Error> {
        if n > self.remaining() {
            Err(Error::out_of_bounds(n, self.remaining()))
        } else {
            Ok(())
        }
    }

    /// Read a single byte.
    #[inline]
    fn take_u8(&mut self) -> Result<u8, Error> { Ok(self.take(1)?[0]) }

    /// Read `size_of::<T>()` bytes and reinterpret them as `T`.
    #[inline]
    fn take_pod<T: AnyBitPattern>(&mut self) -> Result<T, Error> {
        let bytes = self.take(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Read a 4-byte length or element-count prefix.
    #[inline]
    fn take_len(&mut self) -> Result<usize, Error> {
        let len: u32 = self.take_pod()?;
        Ok(len as usize)
    }

    /// Fill `dst` with the next `dst.len()` bytes.
    #[inline]
    fn take_into(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<D: Deserializer + ?Sized> DeserializerExt for D {}

impl<'a> Deserializer for &'a [u8] {
    #[inline]
    fn remaining(&self) -> usize { self.len() }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&[u8], Error> {
        let bytes: &'a [u8] = *self;
        if n > bytes.len() {
            return Err(Error::out_of_bounds(n, bytes.len()));
        }

        let (head, tail) = bytes.split_at(n);
        *self = tail;
        Ok(head)
    }
}

/// A value that can be decoded in place.
///
/// Decoding overwrites the destination instead of building a new value, so containers
/// keep their allocations across repeated decodes.
pub trait Decode {
    /// Read a value from `d` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the input ends early and
    /// [`Error::InvalidValue`] when the bytes are not a valid `Self`. On error `self` may
    /// be partially overwritten.
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error>;

    /// Read a run of values without a prefix into `items`.
    #[doc(hidden)]
    #[inline]
    fn decode_slice<D: Deserializer>(items: &mut [Self], d: &mut D) -> Result<(), Error>
    where
        Self: Sized,
    {
        for item in items {
            item.decode(d)?;
        }
        Ok(())
    }

    /// Read `len` values into `dst`, replacing its contents.
    ///
    /// Elements already in `dst` are decoded in place; missing ones are pushed one at a
    /// time, so a corrupt count runs out of input before it can exhaust memory.
    #[doc(hidden)]
    #[inline]
    fn decode_vec<D: Deserializer>(dst: &mut Vec<Self>, len: usize, d: &mut D) -> Result<(), Error>
    where
        Self: Sized + Default,
    {
        dst.truncate(len);
        Self::decode_slice(dst, d)?;
        while dst.len() < len {
            let mut item = Self::default();
            item.decode(d)?;
            dst.push(item);
        }
        Ok(())
    }
}
