use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::dispatcher::dispatch;
use crate::resp::decoder::try_decode_command;
use crate::store::Stores;

const READ_CHUNK: usize = 4096;

/// Drives one accepted connection: read bytes, decode zero or more
/// complete command frames, dispatch each, write the reply back. Ends
/// on EOF or a decode error; dropping this task is also the point at
/// which any BLPOP suspended by this connection gets cancelled and its
/// waiter registration reaped (the awaited future is simply dropped).
pub async fn handle_connection(mut stream: TcpStream, stores: Stores) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    debug!(peer = %peer, "connection accepted");

    let mut buf = BytesMut::with_capacity(READ_CHUNK);

    loop {
        match try_decode_command(&mut buf) {
            Ok(Some(parts)) => {
                let reply = dispatch(&parts, &stores).await;
                if stream.write_all(&reply).await.is_err() {
                    break;
                }
                continue;
            }
            Ok(None) => {
                // Incomplete frame; fall through to read more bytes.
            }
            Err(err) => {
                warn!(peer = %peer, %err, "closing connection after decode error");
                break;
            }
        }

        let mut chunk = [0u8; READ_CHUNK];
        match stream.read(&mut chunk).await {
            Ok(0) => break, // EOF
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(err) => {
                warn!(peer = %peer, %err, "read error");
                break;
            }
        }
    }

    debug!(peer = %peer, "connection closed");
}
