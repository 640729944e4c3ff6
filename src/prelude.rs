//! Everything needed to encode and decode, in one import.

pub use crate::{
    buffer::Buffer,
    encoding::{
        decode, decode_full, decode_pod, decode_pod_vec, encode, encode_full, encode_pod, encode_pod_slice, Decode,
        Deserializer, DeserializerExt, Encode, Serializer, SerializerExt,
    },
    errors::Error,
    scalar::{Complex32, Complex64},
    shape::Shape,
};

#[cfg(feature = "derive")]
pub use bitbox_derive::{Decode, Encode};
