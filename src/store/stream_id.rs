//! Stream entry ID parsing, packing, validation, and wildcard generation.
//!
//! An ID is a pair `(ms, seq)` of non-negative 64-bit integers, written
//! `ms-seq`. It packs to a 16-byte big-endian key so that byte-lexicographic
//! order on the packed form matches numeric `(ms, seq)` order.

use crate::error::CommandError;
use std::time::{SystemTime, UNIX_EPOCH};

pub const PACKED_ID_LEN: usize = 16;

pub fn pack(ms: u64, seq: u64) -> [u8; PACKED_ID_LEN] {
    let mut out = [0u8; PACKED_ID_LEN];
    out[..8].copy_from_slice(&ms.to_be_bytes());
    out[8..].copy_from_slice(&seq.to_be_bytes());
    out
}

pub fn unpack(key: &[u8]) -> (u64, u64) {
    let ms = u64::from_be_bytes(key[..8].try_into().unwrap());
    let seq = u64::from_be_bytes(key[8..].try_into().unwrap());
    (ms, seq)
}

pub fn format_id(ms: u64, seq: u64) -> String {
    format!("{}-{}", ms, seq)
}

/// Parses a strict `ms-seq` id (no wildcards). Rejects anything that
/// isn't exactly one `-` with two non-negative 64-bit decimals.
pub fn parse_strict(id: &str) -> Result<(u64, u64), CommandError> {
    let (ms_part, seq_part) = id.split_once('-').ok_or(CommandError::InvalidIdFormat)?;
    let ms: u64 = ms_part.parse().map_err(|_| CommandError::InvalidIdFormat)?;
    let seq: u64 = seq_part.parse().map_err(|_| CommandError::InvalidIdFormat)?;
    Ok((ms, seq))
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}

/// Sequence number generated for `<ms>-*`, given the stream's current
/// last id (`None` for an empty stream).
pub fn generate_sequence(ms: u64, last: Option<(u64, u64)>) -> u64 {
    match last {
        None => {
            if ms == 0 {
                1
            } else {
                0
            }
        }
        Some((last_ms, last_seq)) if last_ms == ms => last_seq + 1,
        Some(_) => {
            if ms == 0 {
                1
            } else {
                0
            }
        }
    }
}

/// Resolves an id token (`*`, `<ms>-*`, or a fully explicit `ms-seq`)
/// against the stream's current last id. Does not perform monotonicity
/// validation; call [`validate`] on the result.
pub fn resolve(id_token: &str, last: Option<(u64, u64)>) -> Result<(u64, u64), CommandError> {
    if id_token == "*" {
        let ms = now_ms();
        let seq = generate_sequence(ms, last);
        return Ok((ms, seq));
    }
    if let Some(ms_part) = id_token.strip_suffix("-*") {
        let ms: u64 = ms_part.parse().map_err(|_| CommandError::InvalidIdFormat)?;
        let seq = generate_sequence(ms, last);
        return Ok((ms, seq));
    }
    parse_strict(id_token)
}

/// Enforces the monotonicity invariant: the new id must be greater than
/// `0-0`, and strictly greater than the stream's current last id.
pub fn validate(new_id: (u64, u64), last: Option<(u64, u64)>) -> Result<(), CommandError> {
    if new_id == (0, 0) {
        return Err(CommandError::IdTooSmall);
    }
    if let Some(last) = last {
        if new_id <= last {
            return Err(CommandError::IdNotIncreasing);
        }
    }
    Ok(())
}
