/// Errors that can occur during RESP encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A command must carry at least its verb.
    #[error("command has no arguments")]
    EmptyCommand,

    /// The stream contains a byte that does not start any RESP type.
    #[error("unknown RESP type byte 0x{0:02x}")]
    UnknownType(u8),

    /// The buffered bytes violate the RESP grammar.
    #[error("malformed reply: {0}")]
    Malformed(&'static str),

    /// A bulk string exceeds the configured maximum size.
    #[error("bulk string too large ({size} bytes, max {max})")]
    BulkTooLarge { size: usize, max: usize },

    /// An array exceeds the configured maximum element count.
    #[error("array too large ({len} elements, max {max})")]
    ArrayTooLarge { len: usize, max: usize },

    /// Arrays are nested deeper than the configured limit.
    #[error("reply nested deeper than {max} levels")]
    TooDeep { max: usize },

    /// The peer answered with a RESP error (`-ERR ...`).
    #[error("peer replied with error: {0}")]
    ErrorReply(String),

    /// The reply type cannot be materialized into the requested destination.
    #[error("cannot read {found} reply as {expected}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    /// A textual reply was expected to hold an integer.
    #[error("reply is not an integer: {0:?}")]
    InvalidInteger(String),

    /// A bulk string was expected to hold UTF-8 text.
    #[error("reply is not valid UTF-8")]
    InvalidUtf8,

    /// An I/O error occurred while reading or writing.
    #[error("codec I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream reached EOF.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, CodecError>;
