use crate::error::CommandError;
use crate::resp::encoder::*;
use crate::store::StringStore;
use crate::store::stream_id::now_ms;

/// parts[0] = "SET", parts[1] = key, parts[2] = value,
/// [parts[3] = EX/PX, parts[4] = count]
pub fn process_set(parts: &[String], store: &StringStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 3 && parts.len() != 5 {
        return Err(CommandError::WrongArity("set".to_string()));
    }

    let key = parts[1].clone();
    let value = parts[2].clone();
    let mut expiry_ms: i64 = 0;

    if parts.len() == 5 {
        let count: i64 = parts[4].parse().map_err(|_| CommandError::NotAnInteger)?;
        expiry_ms = match parts[3].to_uppercase().as_str() {
            "EX" => now_ms() as i64 + count * 1000,
            "PX" => now_ms() as i64 + count,
            _ => return Err(CommandError::SyntaxError),
        };
        // count == 0 resolves to a deadline equal to `now`, which would
        // expire on the very next read. The source instead treats a zero
        // count as "no expiry" (the deadline is only computed when the
        // count is non-zero); preserve that quirk rather than "fixing" it.
        if count == 0 {
            expiry_ms = 0;
        }
    }

    store.set(key, value, expiry_ms);
    Ok(encode_simple_string("OK"))
}

/// parts[0] = "GET", parts[1] = key
pub fn process_get(parts: &[String], store: &StringStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 2 {
        return Err(CommandError::WrongArity("get".to_string()));
    }
    match store.get(&parts[1]) {
        Some(value) => Ok(encode_bulk_string(&value)),
        None => Ok(encode_null_string()),
    }
}
