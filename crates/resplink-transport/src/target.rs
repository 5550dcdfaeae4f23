use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TransportError};
use crate::stream::LinkStream;

/// Default read timeout applied to every opened stream.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

const TCP_SCHEME: &str = "tcp://";

/// Where a link is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Serial device path (`/dev/ttyACM0`, `COM3`).
    Serial(String),
    /// TCP serial bridge address (`host:port`), written as `tcp://host:port`.
    Tcp(String),
}

impl FromStr for Target {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(addr) = s.strip_prefix(TCP_SCHEME) {
            if addr.is_empty() || !addr.contains(':') {
                return Err(TransportError::InvalidTarget(s.to_string()));
            }
            return Ok(Target::Tcp(addr.to_string()));
        }
        if s.is_empty() || s.contains("://") {
            return Err(TransportError::InvalidTarget(s.to_string()));
        }
        Ok(Target::Serial(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Serial(path) => f.write_str(path),
            Target::Tcp(addr) => write!(f, "{TCP_SCHEME}{addr}"),
        }
    }
}

/// Configuration for opening a link.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Device path or `tcp://host:port`.
    pub target: String,
    /// Serial line speed. Ignored for TCP targets.
    pub baud_rate: u32,
    /// Upper bound on a single blocking read. Default: 5 s.
    pub read_timeout: Duration,
}

impl TransportConfig {
    /// Configuration for `target` at `baud_rate` with the default read timeout.
    pub fn new(target: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            target: target.into(),
            baud_rate,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Open the link described by `config` (blocking, no retry).
pub fn open(config: &TransportConfig) -> Result<LinkStream> {
    match config.target.parse::<Target>()? {
        Target::Serial(path) => {
            crate::serial::open_serial(&path, config.baud_rate, config.read_timeout)
        }
        Target::Tcp(addr) => crate::tcp::connect(&addr, config.read_timeout),
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn parses_serial_paths() {
        assert_eq!(
            "/dev/ttyUSB0".parse::<Target>().unwrap(),
            Target::Serial("/dev/ttyUSB0".to_string())
        );
        assert_eq!(
            "COM3".parse::<Target>().unwrap(),
            Target::Serial("COM3".to_string())
        );
    }

    #[test]
    fn parses_tcp_bridges() {
        let target = "tcp://192.168.1.20:4001".parse::<Target>().unwrap();
        assert_eq!(target, Target::Tcp("192.168.1.20:4001".to_string()));
        assert_eq!(target.to_string(), "tcp://192.168.1.20:4001");
    }

    #[test]
    fn rejects_malformed_targets() {
        for bad in ["", "   ", "tcp://", "tcp://hostonly", "udp://host:1"] {
            assert!(
                matches!(bad.parse::<Target>(), Err(TransportError::InvalidTarget(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn config_defaults() {
        let cfg = TransportConfig::new("/dev/ttyACM0", 9600);
        assert_eq!(cfg.baud_rate, 9600);
        assert_eq!(cfg.read_timeout, DEFAULT_READ_TIMEOUT);
    }

    #[test]
    fn open_dispatches_tcp_targets() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let cfg = TransportConfig::new(format!("tcp://{addr}"), 0);
        let stream = open(&cfg).unwrap();
        assert_eq!(stream.transport_name(), "tcp");
    }

    #[test]
    fn open_propagates_invalid_target() {
        let cfg = TransportConfig::new("tcp://", 115_200);
        assert!(matches!(open(&cfg), Err(TransportError::InvalidTarget(_))));
    }
}
