//! Errors that can arise when reading or writing packets and host frames.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer too short for the expected fields.
    #[error("buffer truncated: need {need} more bytes, {got} left")]
    Truncated { need: usize, got: usize },

    /// Unknown host frame kind byte.
    #[error("unknown host frame kind: {0:#04x}")]
    UnknownFrameKind(u8),

    /// Direction byte is neither to-client nor to-server.
    #[error("invalid packet direction: {0}")]
    InvalidDirection(u8),

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    /// A field parsed but carries a value we can't use.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// A string doesn't fit its `u16` length prefix.
    #[error("string field too long: {0} bytes")]
    FieldTooLong(usize),
}
