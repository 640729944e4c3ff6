/// The structural class of a type, deciding how it crosses the wire.
///
/// Every [`Encode`](crate::Encode) type carries its shape as an associated constant, so
/// classification happens once per type at compile time instead of once per value.
///
/// # Example
///
/// ```
/// use bitbox::prelude::*;
///
/// assert_eq!(u64::SHAPE, Shape::Scalar { size: 8 });
/// assert_eq!(<[u32; 4]>::SHAPE, Shape::Array { len: 4, elem_size: Some(4) });
/// assert_eq!(<Vec<String>>::SHAPE, Shape::Slice { elem_size: None });
/// assert_eq!(<Option<u8>>::SHAPE, Shape::Pointer);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Fixed-size value written as its raw in-memory bytes.
    Scalar {
        /// Size of the value in bytes.
        size: usize,
    },
    /// UTF-8 text behind a 4-byte length prefix.
    String,
    /// Raw bytes behind a 4-byte length prefix.
    Bytes,
    /// Variable number of elements behind a 4-byte count prefix.
    Slice {
        /// Element wire size when every element has the same fixed size.
        elem_size: Option<usize>,
    },
    /// Statically sized sequence, no prefix.
    Array {
        /// Number of elements.
        len: usize,
        /// Element wire size when every element has the same fixed size.
        elem_size: Option<usize>,
    },
    /// Fields in declaration order.
    Struct {
        /// Size of the whole struct when it is copied as one block (POD mode).
        pod_size: Option<usize>,
    },
    /// Indirection: an `Option` payload behind a 1-byte presence flag, or the target of a
    /// reference or smart pointer. A run of these is never one block.
    Pointer,
}

impl Shape {
    /// Number of bytes every value of this shape occupies on the wire, if that number is
    /// known up front.
    ///
    /// This is `Some` exactly when a run of such values is written and read as one block.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Shape::Scalar { size } => Some(size),
            Shape::Struct { pod_size } => pod_size,
            Shape::Array {
                len,
                elem_size: Some(size),
            } => Some(len * size),
            _ => None,
        }
    }
}
