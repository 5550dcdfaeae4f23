use std::net::TcpStream;
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::stream::LinkStream;

/// Connect to a TCP serial bridge at `addr` (`host:port`, blocking).
pub fn connect(addr: &str, read_timeout: Duration) -> Result<LinkStream> {
    let connect_err = |source| TransportError::Connect {
        target: addr.to_string(),
        source,
    };

    let stream = TcpStream::connect(addr).map_err(connect_err)?;
    stream.set_nodelay(true).map_err(connect_err)?;
    stream
        .set_read_timeout(Some(read_timeout))
        .map_err(connect_err)?;

    debug!(addr, ?read_timeout, "connected to tcp serial bridge");
    Ok(LinkStream::from_tcp(stream))
}
