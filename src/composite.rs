//! Containers, optionals, pointers and tuples.
//!
//! Slices carry a 4-byte element count, arrays carry nothing, and optionals carry a 1-byte
//! presence flag. Pointers and references are transparent.

use crate::{encoding::*, errors::Error, shape::Shape};
use std::{rc::Rc, sync::Arc};

impl<T: Encode> Encode for [T] {
    const SHAPE: Shape = Shape::Slice { elem_size: T::SHAPE.fixed_size() };

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_len(self.len())?;
        T::encode_slice(self, s)
    }
}

impl<T: Encode> Encode for Vec<T> {
    const SHAPE: Shape = <[T]>::SHAPE;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { self.as_slice().encode(s) }
}

impl<T: Decode + Default> Decode for Vec<T> {
    /// Replaces the contents, reusing the vector's allocation and, for nested containers,
    /// the allocations of the elements already present.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        let len = d.take_len()?;
        T::decode_vec(self, len, d)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    const SHAPE: Shape = Shape::Array { len: N, elem_size: T::SHAPE.fixed_size() };

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { T::encode_slice(self, s) }

    /// A run of arrays is one run of their elements, so nested fixed arrays stay one block.
    #[inline]
    fn encode_slice<S: Serializer>(items: &[Self], s: &mut S) -> Result<(), Error> {
        T::encode_slice(items.as_flattened(), s)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> { T::decode_slice(self, d) }

    #[inline]
    fn decode_slice<D: Deserializer>(items: &mut [Self], d: &mut D) -> Result<(), Error> {
        T::decode_slice(items.as_flattened_mut(), d)
    }
}

impl<T: Encode> Encode for Option<T> {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        match self {
            Some(value) => {
                s.put_flag(true);
                value.encode(s)
            }
            None => {
                s.put_flag(false);
                Ok(())
            }
        }
    }
}

impl<T: Decode + Default> Decode for Option<T> {
    /// A zero flag clears the option; any other flag decodes into the existing payload,
    /// allocating a default one first if there is none.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
        if d.take_u8()? == FLAG_ABSENT {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).decode(d)
    }
}

// Pointers and references encode as their target. Their shape is `Pointer` because a run
// of them is never one block.

impl<'a, T: Encode + ?Sized> Encode for &'a T {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).encode(s) }
}

impl<'a, T: Encode + ?Sized> Encode for &'a mut T {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).encode(s) }
}

impl<'a, T: Decode + ?Sized> Decode for &'a mut T {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> { (**self).decode(d) }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).encode(s) }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> { (**self).decode(d) }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).encode(s) }
}

impl<T: Decode + Clone> Decode for Rc<T> {
    /// Decodes into the shared value, cloning it first if other handles point at it.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> { Rc::make_mut(self).decode(d) }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    const SHAPE: Shape = Shape::Pointer;

    #[inline]
    fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).encode(s) }
}

impl<T: Decode + Clone> Decode for Arc<T> {
    /// Decodes into the shared value, cloning it first if other handles point at it.
    #[inline]
    fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> { Arc::make_mut(self).decode(d) }
}

// Tuples are written field by field with nothing in between, like derived structs.
macro_rules! tuple_codec {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            const SHAPE: Shape = Shape::Struct { pod_size: None };

            #[inline]
            fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
                $(self.$idx.encode(s)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            #[inline]
            fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
                $(self.$idx.decode(d)?;)+
                Ok(())
            }
        }
    };
}

tuple_codec!(A 0);
tuple_codec!(A 0, B 1);
tuple_codec!(A 0, B 1, C 2);
tuple_codec!(A 0, B 1, C 2, E 3);
tuple_codec!(A 0, B 1, C 2, E 3, F 4);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6, I 7);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6, I 7, J 8);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6, I 7, J 8, K 9);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6, I 7, J 8, K 9, L 10);
tuple_codec!(A 0, B 1, C 2, E 3, F 4, G 5, H 6, I 7, J 8, K 9, L 10, M 11);

#[cfg(feature = "smallvec")]
mod small {
    use super::*;
    use smallvec::{Array, SmallVec};

    impl<A: Array> Encode for SmallVec<A>
    where
        A::Item: Encode,
    {
        const SHAPE: Shape = <[A::Item]>::SHAPE;

        #[inline]
        fn encode<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { self.as_slice().encode(s) }
    }

    impl<A: Array> Decode for SmallVec<A>
    where
        A::Item: Decode + Default,
    {
        fn decode<D: Deserializer>(&mut self, d: &mut D) -> Result<(), Error> {
            let len = d.take_len()?;
            self.truncate(len);
            <A::Item as Decode>::decode_slice(self, d)?;
            while self.len() < len {
                let mut item = <A::Item>::default();
                item.decode(d)?;
                self.push(item);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buffer::Buffer, decode, decode_full, encode, encode_full};

    #[test]
    fn shapes() {
        assert_eq!(<Vec<u32>>::SHAPE, Shape::Slice { elem_size: Some(4) });
        assert_eq!(<Vec<String>>::SHAPE, Shape::Slice { elem_size: None });
        assert_eq!(<[[u16; 2]; 3]>::SHAPE.fixed_size(), Some(12));
        assert_eq!(<Box<u64>>::SHAPE, Shape::Pointer);
        assert_eq!(<Vec<Box<u64>>>::SHAPE, Shape::Slice { elem_size: None });
        assert_eq!(<(u8, u8)>::SHAPE, Shape::Struct { pod_size: None });
    }

    #[test]
    fn option_layout() {
        // flag
        assert_eq!(encode_full(&None::<u32>).unwrap().data(), &[0]);

        let some = encode_full(&Some(5u32)).unwrap();
        // flag, then payload
        assert_eq!(some.data()[0], 1);
        assert_eq!(some.data()[1..], 5u32.to_ne_bytes());
    }

    #[test]
    fn absent_flag_clears_option() {
        let mut out = Some("stale".to_string());
        decode(&mut &[0u8][..], &mut out).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn any_nonzero_flag_is_present() {
        let mut input = vec![0xffu8];
        input.extend_from_slice(&9u16.to_ne_bytes());

        assert_eq!(decode_full::<Option<u16>>(&input), Ok(Some(9)));
    }

    #[test]
    fn nested_vecs_reuse_inner_allocations() {
        let mut out: Vec<Vec<u8>> = vec![Vec::with_capacity(16), Vec::with_capacity(16)];
        let inner: Vec<*const u8> = out.iter().map(|v| v.as_ptr()).collect();

        let buf = encode_full(&vec![vec![1u8, 2], vec![3]]).unwrap();
        decode(&mut buf.data(), &mut out).unwrap();

        assert_eq!(out, vec![vec![1, 2], vec![3]]);
        assert_eq!(out[0].as_ptr(), inner[0]);
        assert_eq!(out[1].as_ptr(), inner[1]);
    }

    #[test]
    fn shorter_input_truncates_vec() {
        let mut out = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let buf = encode_full(&vec!["z".to_string()]).unwrap();
        decode(&mut buf.data(), &mut out).unwrap();

        assert_eq!(out, vec!["z".to_string()]);
    }

    #[test]
    fn corrupt_count_runs_out_of_input() {
        let mut input = u32::max_value().to_ne_bytes().to_vec();
        input.extend_from_slice(&[0, 0, 0, 0]);

        let res = decode_full::<Vec<String>>(&input);
        assert_eq!(res, Err(Error::out_of_bounds(4, 0)));
    }

    #[test]
    fn nested_arrays_round_trip() {
        let grid = [[1u16, 2], [3, 4], [5, 6]];

        let buf = encode_full(&grid).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(decode_full::<[[u16; 2]; 3]>(buf.data()), Ok(grid));
    }

    #[test]
    fn pointers_are_transparent() {
        let plain = encode_full(&7u32).unwrap();

        assert_eq!(encode_full(&Box::new(7u32)).unwrap(), plain);
        assert_eq!(encode_full(&Rc::new(7u32)).unwrap(), plain);
        assert_eq!(encode_full(&Arc::new(7u32)).unwrap(), plain);
        assert_eq!(encode_full(&&7u32).unwrap(), plain);
    }

    #[test]
    fn shared_pointer_decodes_into_its_own_copy() {
        let first = Rc::new(1u64);
        let mut second = Rc::clone(&first);

        decode(&mut encode_full(&2u64).unwrap(), &mut second).unwrap();

        assert_eq!((*first, *second), (1, 2));
    }

    #[test]
    fn tuple_fields_are_back_to_back() {
        let mut buf = Buffer::new();
        encode(&mut buf, &(1u8, 2u16, "x")).unwrap();

        assert_eq!(buf.len(), 1 + 2 + 4 + 1);
    }

    // counts calls that reach the sink or the source, one per chunk
    struct Chunks(usize);

    impl Serializer for Chunks {
        fn put_u8(&mut self, _: u8) { self.0 += 1 }

        fn put_slice(&mut self, _: &[u8]) { self.0 += 1 }
    }

    struct Takes<'a> {
        rest: &'a [u8],
        count: usize,
    }

    impl Deserializer for Takes<'_> {
        fn remaining(&self) -> usize { self.rest.len() }

        fn take(&mut self, n: usize) -> Result<&[u8], Error> {
            self.count += 1;
            Deserializer::take(&mut self.rest, n)
        }
    }

    fn assert_block_iff_fixed<T>(items: Vec<T>)
    where
        T: Encode + Decode + Default + Clone + PartialEq + std::fmt::Debug,
    {
        assert!(items.len() > 1);
        let fixed = T::SHAPE.fixed_size().is_some();

        let mut sink = Chunks(0);
        items.encode(&mut sink).unwrap();
        // count, then the elements
        assert_eq!(sink.0 == 2, fixed, "{:?} wrote {} chunks", T::SHAPE, sink.0);

        let buf = encode_full(&items).unwrap();
        let mut source = Takes {
            rest: buf.data(),
            count: 0,
        };
        let mut out = vec![T::default(); items.len()];
        out.decode(&mut source).unwrap();
        assert_eq!(out, items);
        assert_eq!(source.count == 2, fixed, "{:?} took {} reads", T::SHAPE, source.count);
    }

    #[test]
    fn fixed_elements_cross_as_one_block() {
        assert_block_iff_fixed(vec![7u32; 3]);
        assert_block_iff_fixed(vec![[1u32, 2, 3, 4]; 3]);
        assert_block_iff_fixed(vec![[[1u16, 2], [3, 4], [5, 6]]; 2]);
        assert_block_iff_fixed(vec!['a', '世', 'z']);
        assert_block_iff_fixed(vec![true, false, true]);
        assert_block_iff_fixed(vec![crate::Complex32 { re: 1.0, im: -1.0 }; 2]);
        assert_block_iff_fixed(vec![[true; 3]; 2]);

        assert_block_iff_fixed(vec!["a".to_string(), "bc".to_string()]);
        assert_block_iff_fixed(vec![Box::new(1u64), Box::new(2)]);
        assert_block_iff_fixed(vec![Some(1u8), None]);
        assert_block_iff_fixed(vec![(1u8, 2u8); 2]);
        assert_block_iff_fixed(vec![vec![1u32], vec![2, 3]]);
        assert_block_iff_fixed(vec![[vec![1u8], vec![1u8]]; 2]);
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn smallvec_matches_vec() {
        use smallvec::{smallvec, SmallVec};

        let small: SmallVec<[u32; 4]> = smallvec![1, 2, 3, 4, 5];
        let buf = encode_full(&small).unwrap();
        assert_eq!(buf, encode_full(&vec![1u32, 2, 3, 4, 5]).unwrap());

        let mut out: SmallVec<[u32; 4]> = smallvec![9; 8];
        decode(&mut buf.data(), &mut out).unwrap();
        assert_eq!(out, small);
    }
}
