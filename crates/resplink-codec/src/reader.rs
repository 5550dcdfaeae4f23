use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};
use tracing::trace;

use crate::codec::{parse_value, CodecConfig};
use crate::error::{CodecError, Result};
use crate::value::{FromReply, Value};

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Result of one decode attempt.
#[derive(Debug)]
pub enum DecodeOutcome {
    /// A reply was decoded and stored in the destination.
    Complete,
    /// A read timed out before a complete reply arrived. Retryable; the
    /// partial bytes stay buffered for the next attempt.
    Incomplete,
    /// A non-null reply arrived but no destination was supplied. The reply
    /// has been consumed.
    ExpectingDestination,
    /// The reply is the RESP null marker.
    Nil,
    /// Terminal decode failure.
    Failed(CodecError),
}

/// Decodes replies from any `Read` stream, one bounded attempt at a time.
///
/// An attempt keeps reading for as long as the stream delivers bytes and the
/// reply is still incomplete. It ends as [`DecodeOutcome::Incomplete`] only
/// when a read times out, so a reply that is already on the wire decodes in
/// one attempt however large it is.
pub struct ReplyReader<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
}

impl<T: Read> ReplyReader<T> {
    /// Create a new reply reader with default limits.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new reply reader with explicit limits.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Attempt to decode one reply into `dest`.
    ///
    /// A reply already sitting in the buffer is returned without touching
    /// the stream.
    pub fn decode<D: FromReply>(&mut self, dest: Option<&mut D>) -> DecodeOutcome {
        match self.next_value() {
            Ok(Some(value)) => materialize(value, dest),
            Ok(None) => DecodeOutcome::Incomplete,
            Err(err) => DecodeOutcome::Failed(err),
        }
    }

    fn next_value(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(value) = self.take_buffered()? {
                return Ok(Some(value));
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    fn take_buffered(&mut self) -> Result<Option<Value>> {
        if self.buf.is_empty() {
            return Ok(None);
        }
        match parse_value(&self.buf, &self.config) {
            Ok(Some((value, used))) => {
                self.buf.advance(used);
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                // Nothing after a grammar violation can be trusted.
                self.buf.clear();
                Err(err)
            }
        }
    }

    /// Read one chunk. Returns `false` when the read timed out empty.
    fn fill(&mut self) -> Result<bool> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    self.buf.clear();
                    return Err(CodecError::ConnectionClosed);
                }
                Ok(n) => {
                    trace!(bytes = n, buffered = self.buf.len() + n, "read reply bytes");
                    self.buf.extend_from_slice(&chunk[..n]);
                    return Ok(true);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    return Ok(false);
                }
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Drop any buffered bytes, returning how many were discarded.
    ///
    /// Used before a new request so a late reply to an abandoned request
    /// cannot be taken as the answer to the next one.
    pub fn discard_buffered(&mut self) -> usize {
        let stale = self.buf.len();
        self.buf.clear();
        stale
    }

    /// Number of bytes received but not yet decoded.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current decoding limits.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

fn materialize<D: FromReply>(value: Value, dest: Option<&mut D>) -> DecodeOutcome {
    match (value, dest) {
        (Value::Nil, _) => DecodeOutcome::Nil,
        (Value::Error(msg), _) => DecodeOutcome::Failed(CodecError::ErrorReply(msg)),
        (_, None) => DecodeOutcome::ExpectingDestination,
        (value, Some(slot)) => match D::from_reply(value) {
            Ok(decoded) => {
                *slot = decoded;
                DecodeOutcome::Complete
            }
            Err(err) => DecodeOutcome::Failed(err),
        },
    }
}
