/// Errors returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The link could not be opened.
    #[error("transport error: {0}")]
    Transport(#[from] resplink_transport::TransportError),

    /// Encoding, flushing or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] resplink_codec::CodecError),

    /// The peer answered with the RESP null marker.
    #[error("received a nil reply")]
    NilReply,

    /// No complete reply arrived within the attempt budget.
    #[error("exceeded maximum read attempts ({attempts})")]
    MaxReadAttemptsExceeded { attempts: u32 },

    /// A previous command panicked while holding the connection.
    #[error("connection lock poisoned; the stream position is unknown")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, ClientError>;
