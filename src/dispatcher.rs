use tracing::{trace, warn};

use crate::commands::{
    process_echo, process_ping, process_type,
    list::{process_blpop, process_llen, process_lrange, process_pop, process_push},
    string::{process_get, process_set},
    stream::{process_xadd, process_xrange},
};
use crate::resp::encoder::encode_error;
use crate::store::{PushSide, Stores};

/// Routes one decoded command vector to the store that owns it and
/// returns an already-RESP-encoded reply. Errors from command handlers
/// are always turned into RESP error frames here — they never reach the
/// connection layer as a `Result::Err`, so a failing command can't
/// silently drop a reply the client is waiting on.
pub async fn dispatch(parts: &[String], stores: &Stores) -> Vec<u8> {
    let Some(name) = parts.first() else {
        return crate::resp::encoder::encode_null_string();
    };

    trace!(cmd = %name, "dispatching command");

    let result = match name.to_uppercase().as_str() {
        "PING" => process_ping(),
        "ECHO" => process_echo(parts),
        "TYPE" => process_type(parts, stores),
        "SET" => process_set(parts, &stores.strings),
        "GET" => process_get(parts, &stores.strings),
        "RPUSH" => process_push(parts, &stores.lists, PushSide::Tail),
        "LPUSH" => process_push(parts, &stores.lists, PushSide::Head),
        "LPOP" => process_pop(parts, &stores.lists),
        "LRANGE" => process_lrange(parts, &stores.lists),
        "LLEN" => process_llen(parts, &stores.lists),
        "BLPOP" => process_blpop(parts, &stores.lists).await,
        "XADD" => process_xadd(parts, &stores.streams),
        "XRANGE" => process_xrange(parts, &stores.streams),
        other => {
            // Mirrors the permissive behaviour of the source: an
            // unrecognised command is not an error, it's just PONG.
            warn!(cmd = other, "unknown command, replying PONG");
            process_ping()
        }
    };

    match result {
        Ok(bytes) => bytes,
        Err(err) => encode_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn unknown_command_replies_pong() {
        let stores = Stores::new();
        let reply = dispatch(&parts(&["FLUBBER"]), &stores).await;
        assert_eq!(reply, b"+PONG\r\n");
    }

    #[tokio::test]
    async fn command_name_is_case_insensitive() {
        let stores = Stores::new();
        let reply = dispatch(&parts(&["ping"]), &stores).await;
        assert_eq!(reply, b"+PONG\r\n");
    }

    #[tokio::test]
    async fn errors_are_encoded_not_dropped() {
        let stores = Stores::new();
        let reply = dispatch(&parts(&["GET"]), &stores).await;
        assert!(reply.starts_with(b"-ERR"));
    }

    #[tokio::test]
    async fn empty_command_is_null_bulk() {
        let stores = Stores::new();
        let reply = dispatch(&[], &stores).await;
        assert_eq!(reply, b"$-1\r\n");
    }
}
