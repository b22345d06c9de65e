//! Server configuration: CLI flags with environment-variable overrides.

use clap::Parser;

/// SpaceNet claim engine server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "spacenetd", about = "SpaceNet territory-control claim engine")]
pub struct ServerConfig {
    /// TCP port the admission service listens on.
    #[arg(long, env = "SPACENET_HTTP_PORT", default_value_t = 8080)]
    pub http_port: u16,

    /// Path to the embedded durable backend. Empty means in-memory
    /// (nothing survives a restart).
    #[arg(long, env = "SPACENET_DB", default_value = "")]
    pub db: String,
}

impl ServerConfig {
    /// `true` iff a durable, on-disk backend was requested.
    pub fn has_durable_backend(&self) -> bool {
        !self.db.is_empty()
    }
}
