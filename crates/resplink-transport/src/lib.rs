//! Byte-stream transport abstraction for resplink.
//!
//! Provides a unified duplex channel over the links a RESP device is reached
//! through:
//! - Serial devices (`/dev/ttyUSB0`, `COM3`, ...)
//! - TCP serial bridges (`tcp://host:port`, e.g. ser2net)
//!
//! This is the lowest layer of resplink. Everything else builds on top of
//! the [`LinkStream`] type provided here.

pub mod error;
pub mod serial;
pub mod stream;
pub mod target;
pub mod tcp;

pub use error::{Result, TransportError};
pub use serial::{available_ports, PortSummary};
pub use stream::LinkStream;
pub use target::{open, Target, TransportConfig, DEFAULT_READ_TIMEOUT};
