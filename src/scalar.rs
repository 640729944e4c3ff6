//! Fixed-size values, written as their raw in-memory bytes in host order.

use crate::{encoding::*, errors::Error, pod, shape::Shape};
use bytemuck::{Pod, Zeroable};
use std::{convert::TryFrom, mem::size_of};

/// A single-precision complex number, laid out as two `f32`s.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Complex32 {
    /// Real part.
    pub re: f32,
    /// Imaginary part.
    pub im: f32,
}

/// A double-precision complex number, laid out as two `f64`s.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Complex64 {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex32 {
    /// Creates `re + im·i`.
    pub const fn new(re: f32, im: f32) -> Self { Complex32 { re, im } }
}

impl Complex64 {
    /// Creates `re + im·i`.
    pub const fn new(re: f64, im: f64) -> Self { Complex64 { re, im } }
}

// Every bit pattern is a valid value of these types, so they go through the block path
// both ways.
macro_rules! pod_scalar {
    ($($typ:ty),* $(,)?) => {
        $(
            impl Encode for $typ {
                const SHAPE: Shape = Shape::Scalar { size: size_of::<$typ>() };

                #[inline]
                fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
                    pod::write_block(self, s);
                    Ok(())
                }

                #[inline]
                fn encode_slice<S: Serializer>(items: &[Self], s: &mut S) -> Result<(), Error> {
                    pod::write_blocks(items, s);
                    Ok(())
                }
            }

            impl Decode for $typ {
                #[inline]
                fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
                    *self = d.take_pod()?;
                    Ok(())
                }

                #[inline]
                fn decode_slice<D: Deserializer>(items: &mut [Self], d: &mut D) -> Result<(), Error> {
                    pod::read_blocks(items, d)
                }

                #[inline]
                fn decode_vec<D: Deserializer>(
                    dst: &mut Vec<Self>,
                    len: usize,
                    d: &mut D,
                ) -> Result<(), Error>
                where
                    Self: Sized + Default,
                {
                    pod::read_block_vec(dst, len, d)
                }
            }
        )*
    };
}

pod_scalar!(u8, u16, u32, u64, u128, usize);
pod_scalar!(i8, i16, i32, i64, i128, isize);
pod_scalar!(f32, f64, Complex32, Complex64);

#[cfg(feature = "half")]
pod_scalar!(half::f16, half::bf16);

impl Encode for bool {
    const SHAPE: Shape = Shape::Scalar { size: 1 };

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_u8(*self as u8);
        Ok(())
    }

    #[inline]
    fn encode_slice<S: Serializer>(items: &[Self], s: &mut S) -> Result<(), Error> {
        pod::write_blocks(items, s);
        Ok(())
    }
}

// Not every byte is a valid `bool`, so decoding maps instead of reinterpreting.
impl Decode for bool {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        *self = d.take_u8()? != 0;
        Ok(())
    }

    #[inline]
    fn decode_slice<D: Deserializer>(items: &mut [Self], d: &mut D) -> Result<(), Error> {
        let bytes = d.take(items.len())?;
        for (item, byte) in items.iter_mut().zip(bytes) {
            *item = *byte != 0;
        }
        Ok(())
    }

    #[inline]
    fn decode_vec<D: Deserializer>(dst: &mut Vec<Self>, len: usize, d: &mut D) -> Result<(), Error>
    where
        Self: Sized + Default,
    {
        d.ensure(len)?;
        dst.clear();
        dst.resize(len, false);
        Self::decode_slice(dst, d)
    }
}

impl Encode for char {
    const SHAPE: Shape = Shape::Scalar { size: 4 };

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_pod(&u32::from(*self));
        Ok(())
    }

    #[inline]
    fn encode_slice<S: Serializer>(items: &[Self], s: &mut S) -> Result<(), Error> {
        pod::write_blocks(items, s);
        Ok(())
    }
}

impl Decode for char {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        *self = char::try_from(d.take_pod::<u32>()?)?;
        Ok(())
    }

    // one read for the run, then each scalar value is checked
    #[inline]
    fn decode_slice<D: Deserializer>(items: &mut [Self], d: &mut D) -> Result<(), Error> {
        let total = items
            .len()
            .checked_mul(size_of::<u32>())
            .ok_or_else(|| Error::out_of_bounds(usize::max_value(), d.remaining()))?;
        let bytes = d.take(total)?;
        for (item, chunk) in items.iter_mut().zip(bytes.chunks_exact(size_of::<u32>())) {
            *item = char::try_from(bytemuck::pod_read_unaligned::<u32>(chunk))?;
        }
        Ok(())
    }
}

impl Encode for () {
    const SHAPE: Shape = Shape::Scalar { size: 0 };

    #[inline]
    fn encode<S: Serializer>(&self, _s: &mut S) -> Result<(), Error> { Ok(()) }
}

impl Decode for () {
    #[inline]
    fn decode<D: Deserializer>(&mut self, _d: &mut D) -> Result<(), Error> { Ok(()) }
}
