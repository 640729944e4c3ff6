//! Strings and byte strings: a 4-byte length, then the raw bytes.
//!
//! `[u8]` and `Vec<u8>` are handled by the slice rule, which produces the same bytes.

use crate::{encoding::*, errors::Error, shape::Shape};
use bytes::{Bytes, BytesMut};

impl Encode for str {
    const SHAPE: Shape = Shape::String;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_bytes(self.as_bytes()) }
}

impl Encode for String {
    const SHAPE: Shape = Shape::String;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { self.as_str().encode(s) }
}

impl Decode for String {
    /// Reuses the string's allocation when it is large enough.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        let len = d.take_len()?;
        let text = std::str::from_utf8(d.take(len)?)?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl Encode for Bytes {
    const SHAPE: Shape = Shape::Bytes;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_bytes(self) }
}

impl Decode for Bytes {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        let len = d.take_len()?;
        *self = Bytes::copy_from_slice(d.take(len)?);
        Ok(())
    }
}

impl Encode for BytesMut {
    const SHAPE: Shape = Shape::Bytes;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_bytes(self) }
}

impl Decode for BytesMut {
    /// Reuses the buffer's allocation when it is large enough.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        let len = d.take_len()?;
        let bytes = d.take(len)?;
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }
}
