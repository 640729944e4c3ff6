use crate::{
    encoding::{Decode, Deserializer, Encode, Serializer},
    errors::*,
};
use bytes::{Buf, Bytes};
use std::io;

/// A growable byte buffer with a read cursor.
///
/// Writes always append at the end; reads consume from the cursor forward. The cursor
/// never moves backwards except through [`Buffer::clear`], which also drops the contents
/// while keeping the allocation, so one buffer can serve a whole encode/decode loop
/// without allocating again.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// let mut buf = Buffer::new();
/// buf.write(&[1, 2, 3, 4]);
///
/// assert_eq!(buf.next(2).unwrap(), &[1, 2]);
/// assert_eq!(buf.len(), 2);
///
/// buf.clear();
/// assert!(buf.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer {
    data: Vec<u8>,
    off: usize,
}

impl Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self { Self::default() }

    /// Creates an empty buffer able to hold `cap` bytes without reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Buffer {
            data: Vec::with_capacity(cap),
            off: 0,
        }
    }

    /// Number of unread bytes.
    #[inline]
    pub fn len(&self) -> usize { self.data.len() - self.off }

    /// Whether every byte has been read.
    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Number of unread bytes, same as [`Buffer::len`].
    ///
    /// Both [`bytes::Buf`] and [`Deserializer`] have a `remaining` method; this one is what
    /// `buf.remaining()` calls when both traits are imported.
    #[inline]
    pub fn remaining(&self) -> usize { self.len() }

    /// Bytes the buffer can hold before it has to grow.
    pub fn capacity(&self) -> usize { self.data.capacity() }

    /// The unread bytes.
    #[inline]
    pub fn data(&self) -> &[u8] { &self.data[self.off..] }

    /// Appends `src` to the end of the buffer. The cursor does not move.
    #[inline]
    pub fn write(&mut self, src: &[u8]) { self.data.extend_from_slice(src) }

    /// Copies unread bytes into `dst`, returning how many were copied.
    ///
    /// Copies fewer than `dst.len()` bytes when fewer remain; that is not an error.
    #[inline]
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len());
        dst[..n].copy_from_slice(&self.data[self.off..self.off + n]);
        self.off += n;
        n
    }

    /// Takes the next `num` unread bytes, moving the cursor past them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if fewer than `num` bytes remain. The cursor stays
    /// where it was.
    #[inline]
    pub fn next(&mut self, num: usize) -> Result<&[u8]> {
        if num > self.len() {
            return Err(Error::out_of_bounds(num, self.len()));
        }

        let off = self.off;
        self.off += num;

        Ok(&self.data[off..self.off])
    }

    /// Drops all bytes and resets the cursor, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.off = 0;
    }

    /// Encodes `value` at the end of the buffer. See [`encode`](crate::encode).
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        crate::encode(self, value)?;
        Ok(self)
    }

    /// Decodes the next value into `dst`. See [`decode`](crate::decode).
    pub fn decode<T: Decode>(&mut self, dst: &mut T) -> Result<()> { crate::decode(self, dst) }

    /// Consumes the buffer, returning the unread bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.drain(..self.off);
        self.data
    }

    /// Consumes the buffer, returning the unread bytes as [`Bytes`].
    pub fn into_bytes(self) -> Bytes {
        let off = self.off;
        Bytes::from(self.data).slice(off..)
    }

    /// Total number of bytes held, read or not. Encoding rolls back to this mark on failure.
    #[inline]
    pub(crate) fn end(&self) -> usize { self.data.len() }

    /// Drops bytes written after `end`. Never cuts into bytes before the cursor.
    pub(crate) fn truncate(&mut self, end: usize) { self.data.truncate(end.max(self.off)) }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self { Buffer { data, off: 0 } }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self { Buffer::from(data.to_vec()) }
}

impl From<Bytes> for Buffer {
    fn from(data: Bytes) -> Self { Buffer::from(data.to_vec()) }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] { self.data() }
}

impl Serializer for Buffer {
    #[inline]
    fn put_u8(&mut self, u: u8) { self.data.push(u) }

    #[inline]
    fn put_slice(&mut self, slice: &[u8]) { self.write(slice) }
}

impl Deserializer for Buffer {
    #[inline]
    fn remaining(&self) -> usize { self.len() }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&[u8]> { self.next(n) }
}

impl Buf for Buffer {
    fn remaining(&self) -> usize { self.len() }

    fn chunk(&self) -> &[u8] { self.data() }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "cannot advance past the end: {} > {}",
            cnt,
            self.len()
        );
        self.off += cnt;
    }
}

impl io::Read for Buffer {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> { Ok(Buffer::read(self, dst)) }
}

impl io::Write for Buffer {
    fn write(&mut self, src: &[u8]) -> io::Result<usize> {
        Buffer::write(self, src);
        Ok(src.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_does_not_move_cursor() {
        let mut buf = Buffer::from(vec![1, 2]);
        assert_eq!(buf.next(1).unwrap(), &[1]);

        buf.write(&[3, 4]);

        assert_eq!(buf.data(), &[2, 3, 4]);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn short_read_is_silent() {
        let mut buf = Buffer::from(vec![7, 8, 9]);
        let mut dst = [0u8; 5];

        assert_eq!(buf.read(&mut dst), 3);
        assert_eq!(dst, [7, 8, 9, 0, 0]);
        assert!(buf.is_empty());
        assert_eq!(buf.read(&mut dst), 0);
    }

    #[test]
    fn next_out_of_bounds_keeps_cursor() {
        let mut buf = Buffer::from(vec![1, 2, 3]);
        buf.next(1).unwrap();

        assert_eq!(buf.next(3), Err(Error::out_of_bounds(3, 2)));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.next(2).unwrap(), &[2, 3]);
    }

    #[test]
    fn remaining_with_both_traits_imported() {
        let mut buf = Buffer::from(vec![1, 2, 3, 4, 5]);
        buf.next(2).unwrap();

        assert_eq!(buf.remaining(), 3);
        assert_eq!(Buf::remaining(&buf), buf.remaining());
        assert_eq!(Deserializer::remaining(&buf), buf.remaining());

        buf.advance(1);
        assert_eq!(buf.remaining(), 2);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = Buffer::with_capacity(64);
        buf.write(&[0; 48]);
        buf.next(10).unwrap();
        let cap = buf.capacity();

        buf.clear();

        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), cap);
        assert!(buf.next(1).is_err());
    }

    #[test]
    fn truncate_never_cuts_read_bytes() {
        let mut buf = Buffer::from(vec![1, 2, 3, 4]);
        buf.next(3).unwrap();

        buf.truncate(1);

        assert_eq!(buf.end(), 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn into_bytes_drops_read_prefix() {
        let mut buf = Buffer::from(vec![1, 2, 3, 4]);
        buf.next(1).unwrap();

        assert_eq!(buf.clone().into_bytes(), Bytes::from_static(&[2, 3, 4]));
        assert_eq!(buf.into_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn buf_and_io_traits_share_the_cursor() {
        use std::io::{Read, Write};

        let mut buf = Buffer::new();
        buf.write_all(&[5, 6, 7]).unwrap();

        assert_eq!(Buf::get_u8(&mut buf), 5);

        let mut rest = Vec::new();
        buf.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![6, 7]);
    }
}
