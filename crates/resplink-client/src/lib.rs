//! Synchronous command/response client for RESP devices.
//!
//! This is the "just works" layer. Open a link, send commands, get typed
//! replies back. Partial delivery from slow links is absorbed by a bounded
//! retry loop; concurrent callers are serialized on the single connection.

pub mod client;
pub mod config;
pub mod connector;
pub mod error;

pub use client::Client;
pub use config::{
    ClientConfig, RetryPolicy, DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_BACKOFF,
    DEFAULT_MAX_READ_ATTEMPTS, DEFAULT_SETTLE_DELAY,
};
pub use connector::{connect, connect_with_config};
pub use error::{ClientError, Result};
pub use resplink_codec::{args, Arg, FromReply, Value};
