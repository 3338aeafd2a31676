//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

/// Real-time room messaging server
#[derive(Debug, Clone, Parser)]
#[command(name = "parlor-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "PARLOR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks an ephemeral port)
    #[arg(long, env = "PARLOR_PORT", default_value_t = 8080)]
    pub port: u16,

    /// HS256 secret used to sign and verify bearer tokens
    #[arg(long, env = "PARLOR_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued tokens
    #[arg(long, env = "PARLOR_TOKEN_TTL_MINUTES", default_value_t = 1440)]
    pub token_ttl_minutes: i64,

    /// Default page size of the history endpoint
    #[arg(
        long,
        env = "PARLOR_HISTORY_LIMIT",
        default_value_t = 50,
        value_parser = clap::value_parser!(u16).range(1..=200)
    )]
    pub history_limit: u16,

    /// Expose `POST /api/sessions` for issuing tokens without a password
    #[arg(long, env = "PARLOR_DEV_LOGIN", default_value_t = false)]
    pub dev_login: bool,

    /// Fallback log level when RUST_LOG is unset
    #[arg(long, env = "PARLOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}
