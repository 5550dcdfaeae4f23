use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};
use crate::value::Value;

/// Default maximum bulk string size: 512 MiB (the RESP protocol limit).
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Default maximum number of elements in one array.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1024 * 1024;

/// Default maximum array nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Longest header line (type byte + length/text) accepted before CRLF.
const MAX_LINE_LEN: usize = 64 * 1024;

const CRLF: &[u8] = b"\r\n";

/// Limits applied while decoding replies.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Maximum bulk string size in bytes. Default: 512 MiB.
    pub max_bulk_len: usize,
    /// Maximum number of elements in a single array. Default: 1 Mi.
    pub max_array_len: usize,
    /// Maximum array nesting depth. Default: 32.
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encode a command as one RESP array of bulk strings.
///
/// Wire format:
/// ```text
/// *<argc>\r\n
/// $<len>\r\n<arg bytes>\r\n   (repeated argc times)
/// ```
pub fn encode_command<B: AsRef<[u8]>>(args: &[B], dst: &mut BytesMut) -> Result<()> {
    if args.is_empty() {
        return Err(CodecError::EmptyCommand);
    }

    let payload: usize = args.iter().map(|a| a.as_ref().len() + 16).sum();
    dst.reserve(16 + payload);
    put_header(dst, b'*', args.len() as i64);
    for arg in args {
        put_bulk(dst, arg.as_ref());
    }
    Ok(())
}

/// Encode any RESP value (used by peers and test doubles).
pub fn encode_value(value: &Value, dst: &mut BytesMut) {
    match value {
        Value::Nil => dst.put_slice(b"$-1\r\n"),
        Value::Simple(text) => put_line(dst, b'+', text.as_bytes()),
        Value::Error(text) => put_line(dst, b'-', text.as_bytes()),
        Value::Integer(n) => put_header(dst, b':', *n),
        Value::Bulk(bytes) => put_bulk(dst, bytes),
        Value::Array(items) => {
            put_header(dst, b'*', items.len() as i64);
            for item in items {
                encode_value(item, dst);
            }
        }
    }
}

fn put_header(dst: &mut BytesMut, tag: u8, n: i64) {
    put_line(dst, tag, n.to_string().as_bytes());
}

fn put_line(dst: &mut BytesMut, tag: u8, body: &[u8]) {
    dst.put_u8(tag);
    dst.put_slice(body);
    dst.put_slice(CRLF);
}

fn put_bulk(dst: &mut BytesMut, bytes: &[u8]) {
    put_header(dst, b'$', bytes.len() as i64);
    dst.put_slice(bytes);
    dst.put_slice(CRLF);
}

/// Parse one complete RESP value from the front of `src`.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete value yet.
/// On success, returns the value and the number of bytes it occupies; the
/// caller is responsible for consuming them.
pub fn parse_value(src: &[u8], config: &CodecConfig) -> Result<Option<(Value, usize)>> {
    parse_at(src, 0, 0, config)
}

fn parse_at(
    src: &[u8],
    pos: usize,
    depth: usize,
    config: &CodecConfig,
) -> Result<Option<(Value, usize)>> {
    let Some(&tag) = src.get(pos) else {
        return Ok(None);
    };
    if !matches!(tag, b'+' | b'-' | b':' | b'$' | b'*') {
        return Err(CodecError::UnknownType(tag));
    }

    let Some(line_end) = find_crlf(src, pos + 1) else {
        if src.len() - pos > MAX_LINE_LEN {
            return Err(CodecError::Malformed("header line exceeds limit"));
        }
        return Ok(None);
    };
    let line = &src[pos + 1..line_end];
    let next = line_end + CRLF.len();

    match tag {
        b'+' => Ok(Some((Value::Simple(lossy(line)), next))),
        b'-' => Ok(Some((Value::Error(lossy(line)), next))),
        b':' => Ok(Some((Value::Integer(parse_int(line)?), next))),
        b'$' => {
            let Some(len) = parse_len(line)? else {
                return Ok(Some((Value::Nil, next)));
            };
            if len > config.max_bulk_len {
                return Err(CodecError::BulkTooLarge {
                    size: len,
                    max: config.max_bulk_len,
                });
            }
            let end = next + len;
            if src.len() < end + CRLF.len() {
                return Ok(None); // Need more data
            }
            if &src[end..end + CRLF.len()] != CRLF {
                return Err(CodecError::Malformed("bulk string not terminated by CRLF"));
            }
            let bytes = Bytes::copy_from_slice(&src[next..end]);
            Ok(Some((Value::Bulk(bytes), end + CRLF.len())))
        }
        _ => {
            let Some(len) = parse_len(line)? else {
                return Ok(Some((Value::Nil, next)));
            };
            if len > config.max_array_len {
                return Err(CodecError::ArrayTooLarge {
                    len,
                    max: config.max_array_len,
                });
            }
            if len > 0 && depth >= config.max_depth {
                return Err(CodecError::TooDeep {
                    max: config.max_depth,
                });
            }

            let mut items = Vec::with_capacity(len.min(1024));
            let mut cursor = next;
            for _ in 0..len {
                match parse_at(src, cursor, depth + 1, config)? {
                    Some((item, after)) => {
                        items.push(item);
                        cursor = after;
                    }
                    None => return Ok(None),
                }
            }
            Ok(Some((Value::Array(items), cursor)))
        }
    }
}

fn find_crlf(src: &[u8], from: usize) -> Option<usize> {
    src.get(from..)?
        .windows(CRLF.len())
        .position(|w| w == CRLF)
        .map(|i| from + i)
}

fn lossy(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

fn parse_int(line: &[u8]) -> Result<i64> {
    std::str::from_utf8(line)
        .ok()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .ok_or(CodecError::Malformed("invalid integer"))
}

/// Length header of a bulk string or array; `None` for the `-1` null form.
fn parse_len(line: &[u8]) -> Result<Option<usize>> {
    match parse_int(line)? {
        -1 => Ok(None),
        n if n < 0 => Err(CodecError::Malformed("negative length")),
        n => usize::try_from(n)
            .map(Some)
            .map_err(|_| CodecError::Malformed("length out of range")),
    }
}
