use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use redis_cache::config::Config;
use redis_cache::connection::handle_connection;
use redis_cache::store::Stores;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let stores = Stores::new();

    let listener = TcpListener::bind(config.addr()).await?;
    info!(addr = %config.addr(), "listening");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _)) => {
                        let stores = stores.clone();
                        tokio::spawn(async move {
                            handle_connection(stream, stores).await;
                        });
                    }
                    Err(err) => error!(%err, "failed to accept connection"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received shutdown signal, no longer accepting new connections");
                break;
            }
        }
    }

    Ok(())
}
