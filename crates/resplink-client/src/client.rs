use std::io::{Read, Write};
use std::sync::Mutex;

use bytes::Bytes;
use resplink_codec::{Arg, DecodeOutcome, FromReply, ReplyReader, RequestWriter, Value};
use tracing::{debug, trace, warn};

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{ClientError, Result};

/// Reader and writer halves of the one link a client owns.
struct Connection<R, W> {
    reader: ReplyReader<R>,
    writer: RequestWriter<W>,
}

/// A synchronous RESP client over a single connection.
///
/// Every command holds the connection for its full request/reply exchange,
/// so concurrent callers (share the client with `Arc`) never interleave on
/// the wire.
pub struct Client<R, W> {
    conn: Mutex<Connection<R, W>>,
    config: ClientConfig,
}

impl<R: Read, W: Write> Client<R, W> {
    /// Build a client over an already-open reader/writer pair.
    ///
    /// No settle delay is applied; see [`crate::connect`] for opening a device.
    pub fn from_parts(reader: R, writer: W, config: ClientConfig) -> Self {
        Self {
            conn: Mutex::new(Connection {
                reader: ReplyReader::with_config(reader, config.codec.clone()),
                writer: RequestWriter::new(writer),
            }),
            config,
        }
    }

    /// Send one command and decode its reply into `dest`.
    ///
    /// Pass `None` when the reply payload is not wanted; any non-null reply
    /// then counts as success. A null reply is always
    /// [`ClientError::NilReply`].
    pub fn command<D: FromReply>(&self, dest: Option<&mut D>, args: &[Arg]) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| ClientError::Poisoned)?;

        let argv: Vec<Bytes> = args.iter().map(Arg::to_bytes).collect();

        // Only bytes already received can be dropped here. A tail of an
        // abandoned reply that lands after this point is parsed as the start
        // of this reply and fails it as a codec error; the reader clears its
        // buffer then, so the command after that starts clean.
        let stale = conn.reader.discard_buffered();
        if stale > 0 {
            warn!(bytes = stale, "discarding unsolicited bytes before request");
        }

        conn.writer.encode(&argv)?;
        conn.writer.flush()?;
        debug!(
            verb = %String::from_utf8_lossy(&argv[0]),
            argc = argv.len(),
            "sent command"
        );

        match await_reply(&mut conn.reader, dest, &self.config.retry)? {
            DecodeOutcome::Complete | DecodeOutcome::ExpectingDestination => Ok(()),
            DecodeOutcome::Nil => Err(ClientError::NilReply),
            DecodeOutcome::Failed(err) => Err(err.into()),
            // await_reply only returns terminal outcomes.
            DecodeOutcome::Incomplete => Err(ClientError::MaxReadAttemptsExceeded {
                attempts: self.config.retry.max_read_attempts,
            }),
        }
    }

    /// Send one command and return its reply as `D`.
    pub fn query<D: FromReply>(&self, args: &[Arg]) -> Result<D> {
        // `Option<D>` is only `None` for a null reply, which `command` has
        // already turned into `NilReply`.
        let mut slot: Option<D> = None;
        self.command(Some(&mut slot), args)?;
        slot.ok_or(ClientError::NilReply)
    }

    /// Send one command, discarding any non-null reply.
    pub fn exec(&self, args: &[Arg]) -> Result<()> {
        self.command::<Value>(None, args)
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Decode attempts until a terminal outcome or the attempt budget runs out.
fn await_reply<R: Read, D: FromReply>(
    reader: &mut ReplyReader<R>,
    mut dest: Option<&mut D>,
    retry: &RetryPolicy,
) -> Result<DecodeOutcome> {
    let max_attempts = retry.max_read_attempts.max(1);

    for attempt in 0..max_attempts {
        match reader.decode(dest.as_mut().map(|slot| &mut **slot)) {
            DecodeOutcome::Incomplete => {
                if attempt + 1 == max_attempts {
                    break;
                }
                let delay = retry.delay_for(attempt);
                trace!(
                    attempt,
                    buffered = reader.buffered(),
                    delay_ms = delay.as_millis() as u64,
                    "reply incomplete, retrying"
                );
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
            outcome => {
                trace!(attempts = attempt + 1, "reply decoded");
                return Ok(outcome);
            }
        }
    }

    warn!(
        attempts = max_attempts,
        buffered = reader.buffered(),
        "no complete reply within attempt budget"
    );
    Err(ClientError::MaxReadAttemptsExceeded {
        attempts: max_attempts,
    })
}

impl<R, W> std::fmt::Debug for Client<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
