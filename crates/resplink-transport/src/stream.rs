use std::io::{Read, Write};
use std::net::TcpStream;

use serialport::SerialPort;

use crate::error::Result;

/// A connected duplex byte stream implementing `Read` and `Write`.
///
/// This is the fundamental I/O type returned by [`crate::open`].
/// Reads block for at most the configured read timeout; a timed-out read
/// surfaces as an `io::Error` of kind `TimedOut` or `WouldBlock`.
pub struct LinkStream {
    inner: LinkStreamInner,
}

enum LinkStreamInner {
    Serial(Box<dyn SerialPort>),
    Tcp(TcpStream),
}

impl Read for LinkStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.read(buf),
            LinkStreamInner::Tcp(stream) => stream.read(buf),
        }
    }
}

impl Write for LinkStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.write(buf),
            LinkStreamInner::Tcp(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.flush(),
            LinkStreamInner::Tcp(stream) => stream.flush(),
        }
    }
}

impl LinkStream {
    pub(crate) fn from_serial(port: Box<dyn SerialPort>) -> Self {
        Self {
            inner: LinkStreamInner::Serial(port),
        }
    }

    pub(crate) fn from_tcp(stream: TcpStream) -> Self {
        Self {
            inner: LinkStreamInner::Tcp(stream),
        }
    }

    /// Try to clone this stream (a second handle onto the same device or socket).
    ///
    /// The client uses this to hold independent reader and writer halves.
    pub fn try_clone(&self) -> Result<Self> {
        match &self.inner {
            LinkStreamInner::Serial(port) => Ok(Self::from_serial(port.try_clone()?)),
            LinkStreamInner::Tcp(stream) => Ok(Self::from_tcp(stream.try_clone()?)),
        }
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match &self.inner {
            LinkStreamInner::Serial(_) => "serial",
            LinkStreamInner::Tcp(_) => "tcp",
        }
    }
}

impl std::fmt::Debug for LinkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            LinkStreamInner::Serial(port) => f
                .debug_struct("LinkStream")
                .field("type", &"serial")
                .field("name", &port.name())
                .finish(),
            LinkStreamInner::Tcp(stream) => f
                .debug_struct("LinkStream")
                .field("type", &"tcp")
                .field("peer", &stream.peer_addr().ok())
                .finish(),
        }
    }
}
