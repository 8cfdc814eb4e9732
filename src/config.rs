use clap::Parser;

/// Startup configuration for the server binary. Read once at process
/// start; there is no live reload.
#[derive(Parser, Debug)]
#[command(name = "redis-cache", about = "An in-memory RESP key-value store")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "REDIS_CACHE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "REDIS_CACHE_PORT", default_value_t = 6379)]
    pub port: u16,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
