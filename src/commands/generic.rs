use crate::error::CommandError;
use crate::resp::encoder::*;
use crate::store::{type_of, Stores};

pub fn process_ping() -> Result<Vec<u8>, CommandError> {
    Ok(encode_simple_string("PONG"))
}

/// parts[0] = "ECHO", parts[1..] joined with a single space
pub fn process_echo(parts: &[String]) -> Result<Vec<u8>, CommandError> {
    if parts.len() < 2 {
        return Err(CommandError::WrongArity("echo".to_string()));
    }
    Ok(encode_bulk_string(&parts[1..].join(" ")))
}

/// parts[0] = "TYPE", parts[1] = key
pub fn process_type(parts: &[String], stores: &Stores) -> Result<Vec<u8>, CommandError> {
    if parts.len() != 2 {
        return Err(CommandError::WrongArity("type".to_string()));
    }
    Ok(encode_simple_string(type_of(stores, &parts[1])))
}
