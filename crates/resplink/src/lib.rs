//! RESP command client for serial-attached and bridged devices.
//!
//! resplink sends Redis-protocol commands to devices behind slow or chunky
//! byte links and decodes exactly one reply per command.
//!
//! # Crate Structure
//!
//! - [`transport`]: Serial and TCP-bridge links
//! - [`codec`]: RESP encoding, incremental decoding and argument coercion
//! - [`client`]: Synchronous client with bounded-retry reply decoding
//!
//! ```no_run
//! use resplink::client::{args, Client};
//!
//! # fn main() -> Result<(), resplink::client::ClientError> {
//! let client = Client::open("/dev/ttyACM0", 115_200)?;
//! let pong: String = client.query(&args!["PING"])?;
//! assert_eq!(pong, "PONG");
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use resplink_transport::*;
}

/// Re-export codec types.
pub mod codec {
    pub use resplink_codec::*;
}

/// Re-export client types.
pub mod client {
    pub use resplink_client::*;
}

pub use resplink_client::{args, Arg, Client, ClientConfig, ClientError, FromReply, Value};
