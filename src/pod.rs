//! Block copies of plain-old-data.
//!
//! A type is plain-old-data when its whole in-memory footprint can be written as its wire
//! form: no pointers, no padding, every bit pattern valid. That capability is
//! [`bytemuck::Pod`], so misuse is a compile error rather than corrupt output.
//!
//! The scalar codec, POD-mode structs (`#[bitbox(pod)]`) and [`PodVec`] route through
//! here; nothing else in the crate reinterprets memory.

use crate::encoding::{Decode, Deserializer, DeserializerExt, Encode, Serializer, SerializerExt};
use crate::errors::*;
use crate::shape::Shape;
use bytemuck::{NoUninit, Pod};
use log::trace;
use std::mem::size_of;

/// The raw in-memory bytes of `value`.
///
/// # Example
///
/// ```
/// let n = 0x0102_0304u32;
///
/// assert_eq!(bitbox::pod::as_bytes(&n), &n.to_ne_bytes());
/// ```
#[inline]
pub fn as_bytes<T: NoUninit>(value: &T) -> &[u8] { bytemuck::bytes_of(value) }

/// Writes `value` as one block.
#[inline]
pub fn write_block<T: NoUninit, S: Serializer + ?Sized>(value: &T, s: &mut S) {
    s.put_slice(as_bytes(value))
}

/// Writes `items` back to back as one block, without a prefix.
#[inline]
pub fn write_blocks<T: NoUninit, S: Serializer + ?Sized>(items: &[T], s: &mut S) {
    trace!("bitbox: writing {} x {} byte block", items.len(), size_of::<T>());
    s.put_slice(bytemuck::cast_slice(items))
}

/// Overwrites `dst` with the next `size_of::<T>()` bytes.
#[inline]
pub fn read_block<T: Pod, D: Deserializer + ?Sized>(dst: &mut T, d: &mut D) -> Result<()> {
    d.take_into(bytemuck::bytes_of_mut(dst))
}

/// Overwrites every element of `items` from one block.
#[inline]
pub fn read_blocks<T: Pod, D: Deserializer + ?Sized>(items: &mut [T], d: &mut D) -> Result<()> {
    trace!("bitbox: reading {} x {} byte block", items.len(), size_of::<T>());
    d.take_into(bytemuck::cast_slice_mut(items))
}

/// Replaces the contents of `dst` with `len` elements read from one block.
///
/// The input is checked for `len` elements before `dst` is resized, and `dst` keeps its
/// allocation when it already has room.
#[inline]
pub fn read_block_vec<T: Pod, D: Deserializer + ?Sized>(dst: &mut Vec<T>, len: usize, d: &mut D) -> Result<()> {
    let total = len
        .checked_mul(size_of::<T>())
        .ok_or_else(|| Error::out_of_bounds(usize::max_value(), d.remaining()))?;
    d.ensure(total)?;

    dst.clear();
    dst.resize(len, T::zeroed());
    read_blocks(dst, d)
}

/// A `Vec` of any [`bytemuck::Pod`] type, written as a 4-byte count and one block.
///
/// This lets types from other crates, which cannot derive [`Encode`], sit inside encoded
/// values. The wire form is the same as a `Vec` of a `#[bitbox(pod)]` struct with the
/// same layout.
///
/// # Example
///
/// ```
/// use bitbox::{pod::PodVec, prelude::*};
///
/// let runs = vec![PodVec(vec![[1u16, 2]; 2]), PodVec(Vec::new())];
/// let buf = encode_full(&runs).unwrap();
///
/// // outer count, then a count and a block per run
/// assert_eq!(buf.len(), 4 + (4 + 8) + 4);
/// assert_eq!(decode_full::<Vec<PodVec<[u16; 2]>>>(buf.data()).unwrap(), runs);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodVec<T>(pub Vec<T>);

impl<T> Default for PodVec<T> {
    fn default() -> Self { PodVec(Vec::new()) }
}

impl<T> From<Vec<T>> for PodVec<T> {
    fn from(items: Vec<T>) -> Self { PodVec(items) }
}

impl<T: NoUninit> Encode for PodVec<T> {
    const SHAPE: Shape = Shape::Slice {
        elem_size: Some(size_of::<T>()),
    };

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_len(self.0.len())?;
        write_blocks(&self.0, s);
        Ok(())
    }
}

impl<T: Pod> Decode for PodVec<T> {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<()> {
        let len = d.take_len()?;
        read_block_vec(&mut self.0, len, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
    struct Aligned {
        a: u64,
        b: u32,
        c: u16,
        d: u16,
    }

    #[test]
    fn struct_footprint_is_the_wire_form() {
        let v = Aligned {
            a: 0x1122_3344_5566_7788,
            b: 0x99AA_BBCC,
            c: 0xDDEE,
            d: 0xFF00,
        };

        let mut out = Vec::new();
        write_block(&v, &mut out);

        assert_eq!(out.len(), 16);
        assert_eq!(out[..8], 0x1122_3344_5566_7788u64.to_ne_bytes());

        let mut back = Aligned::default();
        read_block(&mut back, &mut &out[..]).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn short_input_leaves_vec_alone() {
        let mut dst = vec![1u32, 2, 3];
        let input = [0u8; 7];

        let res = read_block_vec(&mut dst, 2, &mut &input[..]);

        assert_eq!(res, Err(Error::out_of_bounds(8, 7)));
        assert_eq!(dst, vec![1, 2, 3]);
    }

    #[test]
    fn absurd_counts_are_rejected_before_allocating() {
        let mut dst: Vec<u64> = Vec::new();

        assert!(read_block_vec(&mut dst, usize::max_value(), &mut &[0u8; 16][..]).is_err());
        assert_eq!(dst.capacity(), 0);
    }

    #[test]
    fn pod_vec_is_count_then_block() {
        let items = vec![
            Aligned {
                a: 1,
                b: 2,
                c: 3,
                d: 4,
            };
            3
        ];

        let mut out = Vec::new();
        PodVec(items.clone()).encode(&mut out).unwrap();

        assert_eq!(out[..4], 3u32.to_ne_bytes());
        assert_eq!(&out[4..], bytemuck::cast_slice::<Aligned, u8>(&items));

        let mut back = PodVec(vec![Aligned::default(); 8]);
        back.decode(&mut &out[..]).unwrap();
        assert_eq!(back.0, items);
    }

    #[test]
    fn block_vec_reuses_allocation() {
        let mut dst: Vec<u16> = Vec::with_capacity(8);
        let ptr = dst.as_ptr();

        let mut src = Vec::new();
        write_blocks(&[1u16, 2, 3, 4], &mut src);
        read_block_vec(&mut dst, 4, &mut &src[..]).unwrap();

        assert_eq!(dst, vec![1, 2, 3, 4]);
        assert_eq!(dst.as_ptr(), ptr);
    }
}
