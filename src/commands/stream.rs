use crate::error::CommandError;
use crate::resp::encoder::*;
use crate::store::stream_id::{self, PACKED_ID_LEN};
use crate::store::StreamStore;

/// parts[0] = "XADD", parts[1] = key, parts[2] = id, parts[3..] = field/value pairs
pub fn process_xadd(parts: &[String], store: &StreamStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() < 5 || (parts.len() - 3) % 2 != 0 {
        return Err(CommandError::WrongArity("xadd".to_string()));
    }
    let key = &parts[1];
    let id_token = &parts[2];
    let fields: Vec<(String, String)> = parts[3..]
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    let id = store.add(key, id_token, fields)?;
    Ok(encode_bulk_string(&id))
}

/// parts[0] = "XRANGE", parts[1] = key, parts[2] = start, parts[3] = end
pub fn process_xrange(parts: &[String], store: &StreamStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 4 {
        return Err(CommandError::WrongArity("xrange".to_string()));
    }
    let start = parse_range_bound(&parts[2], true)?;
    let end = parse_range_bound(&parts[3], false)?;

    let entries = store.range(&parts[1], start, end);
    let encoded = entries
        .into_iter()
        .map(|e: crate::store::stream_store::RangedEntry| encode_stream_entry(&e.id, &e.fields))
        .collect();
    Ok(encode_raw_array(encoded))
}

/// Parses a XRANGE bound: `-`, `+`, a bare millisecond count, or a full
/// `ms-seq` id. A bare count packs as `ms-0` on the start side and
/// `ms-u64::MAX` on the end side, so the whole millisecond is covered.
fn parse_range_bound(token: &str, is_start: bool) -> Result<[u8; PACKED_ID_LEN], CommandError> {
    if token == "-" {
        return Ok(stream_id::pack(0, 0));
    }
    if token == "+" {
        return Ok(stream_id::pack(u64::MAX, u64::MAX));
    }
    if let Some((ms_part, seq_part)) = token.split_once('-') {
        let ms: u64 = ms_part.parse().map_err(|_| CommandError::InvalidIdFormat)?;
        let seq: u64 = seq_part.parse().map_err(|_| CommandError::InvalidIdFormat)?;
        return Ok(stream_id::pack(ms, seq));
    }
    let ms: u64 = token.parse().map_err(|_| CommandError::InvalidIdFormat)?;
    let seq = if is_start { 0 } else { u64::MAX };
    Ok(stream_id::pack(ms, seq))
}
