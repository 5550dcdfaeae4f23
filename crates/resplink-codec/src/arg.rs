use bytes::Bytes;

/// A single command argument before it is put on the wire.
///
/// Every variant has one canonical byte rendering, see [`Arg::to_bytes`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bool(bool),
    Bytes(Bytes),
}

impl Arg {
    /// The bulk-string payload sent for this argument.
    ///
    /// Numbers use their decimal form, booleans `true`/`false`, text its
    /// UTF-8 bytes. Byte sequences are passed through untouched.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Arg::Int(n) => Bytes::from(n.to_string()),
            Arg::UInt(n) => Bytes::from(n.to_string()),
            Arg::Float(f) => Bytes::from(f.to_string()),
            Arg::Text(text) => Bytes::copy_from_slice(text.as_bytes()),
            Arg::Bool(b) => Bytes::from_static(if *b { b"true" } else { b"false" }),
            Arg::Bytes(bytes) => bytes.clone(),
        }
    }
}

/// Build an `[Arg; N]` from heterogeneous values.
///
/// ```
/// use resplink_codec::{args, Arg};
///
/// let cmd = args!["SET", "counter", 42];
/// assert_eq!(cmd[2], Arg::Int(42));
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let empty: [$crate::Arg; 0] = [];
        empty
    }};
    ($($arg:expr),+ $(,)?) => {
        [$($crate::Arg::from($arg)),+]
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::Int(value as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::UInt(value as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<Bytes> for Arg {
    fn from(value: Bytes) -> Self {
        Arg::Bytes(value)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(value: Vec<u8>) -> Self {
        Arg::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(value))
    }
}

impl<const N: usize> From<&[u8; N]> for Arg {
    fn from(value: &[u8; N]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(value))
    }
}
