use std::time::Duration;

use crate::error::CommandError;
use crate::resp::encoder::*;
use crate::store::{ListStore, PushSide};

/// parts[0] = "RPUSH"/"LPUSH", parts[1] = key, parts[2..] = values
pub fn process_push(
    parts: &[String],
    store: &ListStore,
    side: PushSide,
) -> Result<Vec<u8>, CommandError> {
    if parts.len() < 3 {
        let name = match side {
            PushSide::Head => "lpush",
            PushSide::Tail => "rpush",
        };
        return Err(CommandError::WrongArity(name.to_string()));
    }
    let key = &parts[1];
    let values: Vec<String> = parts[2..].to_vec();
    let len = store.push(key, values, side);
    Ok(encode_integer(len as i64))
}

/// parts[0] = "LPOP", parts[1] = key, [parts[2] = count]
pub fn process_pop(parts: &[String], store: &ListStore) -> Result<Vec<u8>, CommandError> {
    match parts.len() {
        2 => match store.pop_front(&parts[1]) {
            Some(value) => Ok(encode_bulk_string(&value)),
            None => Ok(encode_null_string()),
        },
        3 => {
            let count: i64 = parts[2].parse().map_err(|_| CommandError::NotAnInteger)?;
            if count < 0 {
                return Err(CommandError::NotAnInteger);
            }
            let values = store.pop_front_many(&parts[1], count as usize);
            Ok(encode_array(&values))
        }
        _ => Err(CommandError::WrongArity("lpop".to_string())),
    }
}

/// parts[0] = "LRANGE", parts[1] = key, parts[2] = start, parts[3] = stop
pub fn process_lrange(parts: &[String], store: &ListStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 4 {
        return Err(CommandError::WrongArity("lrange".to_string()));
    }
    let start: i64 = parts[2]
        .parse()
        .map_err(|_| CommandError::InvalidIndex("start"))?;
    let stop: i64 = parts[3]
        .parse()
        .map_err(|_| CommandError::InvalidIndex("stop"))?;
    Ok(encode_array(&store.range(&parts[1], start, stop)))
}

/// parts[0] = "LLEN", parts[1] = key
pub fn process_llen(parts: &[String], store: &ListStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 2 {
        return Err(CommandError::WrongArity("llen".to_string()));
    }
    Ok(encode_integer(store.len(&parts[1]) as i64))
}

/// parts[0] = "BLPOP", parts[1..len-1] = keys, parts[last] = timeout
pub async fn process_blpop(parts: &[String], store: &ListStore) -> Result<Vec<u8>, CommandError> {
    if parts.len() < 3 {
        return Err(CommandError::WrongArity("blpop".to_string()));
    }
    let timeout_secs: f64 = parts[parts.len() - 1]
        .parse()
        .map_err(|_| CommandError::InvalidTimeout)?;
    if timeout_secs < 0.0 || !timeout_secs.is_finite() {
        return Err(CommandError::InvalidTimeout);
    }
    let keys: Vec<String> = parts[1..parts.len() - 1].to_vec();
    let timeout = Duration::from_secs_f64(timeout_secs);

    match store.blpop(&keys, timeout).await {
        Some((key, value)) => Ok(encode_array(&[key, value])),
        None => Ok(encode_null_array()),
    }
}
