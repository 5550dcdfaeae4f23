/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial device.
    #[error("failed to open serial device {target}: {source}")]
    Open {
        target: String,
        source: serialport::Error,
    },

    /// Failed to connect to a TCP serial bridge.
    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        source: std::io::Error,
    },

    /// The target string could not be interpreted.
    #[error("invalid transport target '{0}'")]
    InvalidTarget(String),

    /// Serial port control operation failed (timeouts, cloning, enumeration).
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
