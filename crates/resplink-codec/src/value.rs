use bytes::Bytes;

use crate::error::{CodecError, Result};

/// A decoded RESP2 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `$-1` or `*-1`: the peer explicitly returned nothing.
    Nil,
    /// `+OK`
    Simple(String),
    /// `-ERR message`
    Error(String),
    /// `:42`
    Integer(i64),
    /// `$3\r\nfoo`
    Bulk(Bytes),
    /// `*2\r\n...`
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the RESP type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Simple(_) => "simple string",
            Value::Error(_) => "error",
            Value::Integer(_) => "integer",
            Value::Bulk(_) => "bulk string",
            Value::Array(_) => "array",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

/// Destination types a reply can be materialized into.
///
/// Top-level nil and error replies never reach `from_reply`: the reader
/// reports them as [`crate::DecodeOutcome::Nil`] and
/// [`CodecError::ErrorReply`]. Nested values inside arrays do.
pub trait FromReply: Sized {
    fn from_reply(value: Value) -> Result<Self>;
}

fn unexpected(expected: &'static str, value: Value) -> CodecError {
    match value {
        Value::Error(msg) => CodecError::ErrorReply(msg),
        other => CodecError::UnexpectedType {
            expected,
            found: other.kind(),
        },
    }
}

fn parse_integer(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| CodecError::InvalidInteger(text.to_string()))
}

impl FromReply for Value {
    fn from_reply(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromReply for String {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Simple(text) => Ok(text),
            Value::Bulk(bytes) => {
                String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
            }
            Value::Integer(n) => Ok(n.to_string()),
            other => Err(unexpected("string", other)),
        }
    }
}

impl FromReply for Bytes {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Bulk(bytes) => Ok(bytes),
            Value::Simple(text) => Ok(Bytes::from(text)),
            Value::Integer(n) => Ok(Bytes::from(n.to_string())),
            other => Err(unexpected("bytes", other)),
        }
    }
}

impl FromReply for i64 {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            Value::Simple(text) => parse_integer(&text),
            Value::Bulk(bytes) => {
                let text = std::str::from_utf8(&bytes).map_err(|_| CodecError::InvalidUtf8)?;
                parse_integer(text)
            }
            other => Err(unexpected("integer", other)),
        }
    }
}

impl FromReply for u64 {
    fn from_reply(value: Value) -> Result<Self> {
        let n = i64::from_reply(value)?;
        u64::try_from(n).map_err(|_| CodecError::InvalidInteger(n.to_string()))
    }
}

impl FromReply for bool {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n != 0),
            Value::Simple(text) => Ok(text.eq_ignore_ascii_case("ok") || text == "1"),
            Value::Bulk(bytes) => match bytes.as_ref() {
                b"1" | b"true" => Ok(true),
                b"0" | b"false" => Ok(false),
                _ => Err(CodecError::UnexpectedType {
                    expected: "boolean",
                    found: "bulk string",
                }),
            },
            other => Err(unexpected("boolean", other)),
        }
    }
}

impl<T: FromReply> FromReply for Vec<T> {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_reply).collect(),
            other => Err(unexpected("array", other)),
        }
    }
}

impl<T: FromReply> FromReply for Option<T> {
    fn from_reply(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_reply(other).map(Some),
        }
    }
}
