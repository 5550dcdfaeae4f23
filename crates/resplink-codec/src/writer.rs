use std::io::{ErrorKind, Write};

use bytes::{Buf, BytesMut};
use tracing::trace;

use crate::codec::encode_command;
use crate::error::{CodecError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Buffers encoded requests and pushes them to any `Write` stream on flush.
pub struct RequestWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> RequestWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode one command into the write buffer.
    ///
    /// Nothing reaches the stream until [`flush`](Self::flush).
    pub fn encode<B: AsRef<[u8]>>(&mut self, args: &[B]) -> Result<()> {
        encode_command(args, &mut self.buf)
    }

    /// Write all buffered bytes and flush the underlying stream.
    ///
    /// On failure the unsent remainder is dropped: the stream position is
    /// unknown and resending a partial request would only corrupt it further.
    pub fn flush(&mut self) -> Result<()> {
        let result = self.drain();
        self.buf.clear();
        result
    }

    fn drain(&mut self) -> Result<()> {
        trace!(bytes = self.buf.len(), "writing request");
        while !self.buf.is_empty() {
            match self.inner.write(&self.buf) {
                Ok(0) => return Err(CodecError::ConnectionClosed),
                Ok(n) => self.buf.advance(n),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Number of encoded bytes not yet written.
    pub fn pending(&self) -> usize {
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn nothing_written_before_flush() {
        let mut writer = RequestWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.encode(&["PING"]).unwrap();

        assert!(writer.get_ref().get_ref().is_empty());
        assert_eq!(writer.pending(), 14);

        writer.flush().unwrap();
        assert_eq!(writer.pending(), 0);
        assert_eq!(writer.into_inner().into_inner(), b"*1\r\n$4\r\nPING\r\n");
    }

    #[test]
    fn empty_command_leaves_buffer_untouched() {
        let mut writer = RequestWriter::new(Cursor::new(Vec::<u8>::new()));
        let err = writer.encode::<&str>(&[]).unwrap_err();
        assert!(matches!(err, CodecError::EmptyCommand));
        assert_eq!(writer.pending(), 0);
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = RequestWriter::new(sink);

        writer.encode(&["GET", "k"]).unwrap();
        writer.flush().unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn handles_short_and_interrupted_writes() {
        let mut writer = RequestWriter::new(TrickleWriter {
            interrupted: false,
            data: Vec::new(),
        });
        writer.encode(&["ECHO", "slowly"]).unwrap();
        writer.flush().unwrap();

        assert_eq!(
            writer.into_inner().data,
            b"*2\r\n$4\r\nECHO\r\n$6\r\nslowly\r\n"
        );
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut writer = RequestWriter::new(ZeroWriter);
        writer.encode(&["PING"]).unwrap();
        let err = writer.flush().unwrap_err();
        assert!(matches!(err, CodecError::ConnectionClosed));
        assert_eq!(writer.pending(), 0);
    }

    #[test]
    fn flush_error_is_reported() {
        let mut writer = RequestWriter::new(BrokenPipe);
        writer.encode(&["PING"]).unwrap();
        let err = writer.flush().unwrap_err();
        assert!(matches!(err, CodecError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Accepts at most three bytes per call and fails the first call.
    struct TrickleWriter {
        interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for TrickleWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = buf.len().min(3);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }
    }
}
