use bytes::{Buf, BytesMut};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("protocol error: expected '*', got something else")]
    ExpectedArray,
    #[error("protocol error: expected '$', got something else")]
    ExpectedBulkString,
    #[error("protocol error: invalid integer")]
    InvalidInteger,
    #[error("protocol error: negative length")]
    NegativeLength,
    #[error("protocol error: declared bulk length does not match payload")]
    LengthMismatch,
    #[error("invalid utf-8 in bulk string payload")]
    InvalidUtf8,
}

/// Attempts to decode one complete command frame from the front of `buf`.
///
/// On success the consumed bytes are removed from `buf` and the decoded
/// argument vector (command name first) is returned. Returns `Ok(None)`
/// when `buf` holds an incomplete frame — the caller should read more
/// bytes off the socket and retry; `buf` is left untouched in that case.
/// Returns `Err` on a malformed frame; the caller must close the
/// connection, the protocol offers no resynchronization after that point.
pub fn try_decode_command(buf: &mut BytesMut) -> Result<Option<Vec<String>>, DecodeError> {
    let mut cursor = 0usize;
    match parse_array(buf, &mut cursor)? {
        Some(items) => {
            buf.advance(cursor);
            Ok(Some(items))
        }
        None => Ok(None),
    }
}

fn find_crlf(buf: &[u8], from: usize) -> Option<usize> {
    buf[from..].windows(2).position(|w| w == b"\r\n").map(|p| p + from)
}

fn parse_line<'a>(buf: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
    let end = find_crlf(buf, *cursor)?;
    let line = &buf[*cursor..end];
    *cursor = end + 2;
    Some(line)
}

fn parse_length(line: &[u8]) -> Result<i64, DecodeError> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(DecodeError::InvalidInteger)
}

fn parse_array(buf: &[u8], cursor: &mut usize) -> Result<Option<Vec<String>>, DecodeError> {
    if *cursor >= buf.len() {
        return Ok(None);
    }
    if buf[*cursor] != b'*' {
        return Err(DecodeError::ExpectedArray);
    }
    let mut probe = *cursor + 1;
    let Some(line) = parse_line(buf, &mut probe) else {
        return Ok(None);
    };
    let count = parse_length(line)?;
    if count < 0 {
        return Err(DecodeError::NegativeLength);
    }
    *cursor = probe;
    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match parse_bulk_string(buf, cursor)? {
            Some(s) => items.push(s),
            None => return Ok(None),
        }
    }
    Ok(Some(items))
}

fn parse_bulk_string(buf: &[u8], cursor: &mut usize) -> Result<Option<String>, DecodeError> {
    if *cursor >= buf.len() {
        return Ok(None);
    }
    if buf[*cursor] != b'$' {
        return Err(DecodeError::ExpectedBulkString);
    }
    let mut probe = *cursor + 1;
    let Some(line) = parse_line(buf, &mut probe) else {
        return Ok(None);
    };
    let len = parse_length(line)?;
    if len < 0 {
        return Err(DecodeError::NegativeLength);
    }
    let len = len as usize;
    if buf.len() < probe + len + 2 {
        return Ok(None);
    }
    let payload = &buf[probe..probe + len];
    if &buf[probe + len..probe + len + 2] != b"\r\n" {
        return Err(DecodeError::LengthMismatch);
    }
    let s = std::str::from_utf8(payload)
        .map_err(|_| DecodeError::InvalidUtf8)?
        .to_string();
    *cursor = probe + len + 2;
    Ok(Some(s))
}

/// Decodes a single, already-complete frame from a `&str`. Convenience
/// wrapper over [`try_decode_command`] for call sites (and tests) that
/// hold a whole buffer up front rather than streaming it incrementally.
pub fn decode_resp(input: &str) -> Result<Vec<String>, DecodeError> {
    let mut buf = BytesMut::from(input.as_bytes());
    match try_decode_command(&mut buf)? {
        Some(items) => Ok(items),
        None => Err(DecodeError::LengthMismatch),
    }
}
