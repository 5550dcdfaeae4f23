//! RESP encoding and incremental decoding over unreliable byte streams.
//!
//! Requests are always arrays of bulk strings:
//!
//! ```text
//! *2\r\n$3\r\nGET\r\n$3\r\nkey\r\n
//! ```
//!
//! Replies may be any RESP2 value. A decode attempt reads while bytes keep
//! arriving and ends at the first read timeout, reporting partial input as
//! [`DecodeOutcome::Incomplete`] so callers can retry.

pub mod arg;
pub mod codec;
pub mod error;
pub mod reader;
pub mod value;
pub mod writer;

pub use arg::Arg;
pub use codec::{
    encode_command, encode_value, parse_value, CodecConfig, DEFAULT_MAX_ARRAY_LEN,
    DEFAULT_MAX_BULK_LEN, DEFAULT_MAX_DEPTH,
};
pub use error::{CodecError, Result};
pub use reader::{DecodeOutcome, ReplyReader};
pub use value::{FromReply, Value};
pub use writer::RequestWriter;
