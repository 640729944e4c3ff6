use failure::Fail;
use std::{char::CharTryFromError, str::Utf8Error};

/// Errors raised while encoding into or decoding from a bitbox buffer.
///
/// Only [`Error::OutOfBounds`] can be caused by the buffer itself. The other two variants
/// report values that cannot cross the wire in the requested direction.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    /// A read asked for more bytes than remain in the input.
    #[fail(display = "bitbox: out of bounds: need={} have={}", need, have)]
    OutOfBounds {
        /// Bytes requested by the read.
        need: usize,
        /// Bytes left in the input when the read was attempted.
        have: usize,
    },
    /// A length or element count does not fit the 4-byte wire prefix.
    #[fail(display = "bitbox: length {} exceeds the 32-bit length prefix", _0)]
    LengthOverflow(usize),
    /// Decoded bytes are not a valid value of the destination type.
    #[fail(display = "bitbox: invalid value: {}", _0)]
    InvalidValue(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_bounds(need: usize, have: usize) -> Self { Error::OutOfBounds { need, have } }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self { Error::InvalidValue(format!("string is not utf-8: {}", e)) }
}

impl From<CharTryFromError> for Error {
    fn from(e: CharTryFromError) -> Self { Error::InvalidValue(format!("char: {}", e)) }
}
