//! Gateway configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the gateway server.
///
/// Loaded from a TOML file when `CI_GATEWAY_CONFIG` points at one,
/// otherwise every field falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to. Default: 127.0.0.1.
    pub bind_host: String,
    /// Port the HTTP server binds to. Default: 8080.
    pub bind_port: u16,
    /// SQLite connection URL for the node store.
    pub database_url: String,
    /// Timeout applied to every outbound Jenkins request, in seconds.
    pub jenkins_timeout_secs: u64,
    /// tracing env-filter directive, e.g. "info" or "ci_gateway=debug".
    pub log_filter: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            bind_port: 8080,
            database_url: "sqlite://ci_gateway.db?mode=rwc".to_string(),
            jenkins_timeout_secs: 10,
            log_filter: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from the file named by `CI_GATEWAY_CONFIG`,
    /// or defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CI_GATEWAY_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parses a TOML config file. A missing or malformed file is an error;
    /// absent keys take their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg = toml::from_str(&raw)?;
        Ok(cfg)
    }

    /// Socket address string for the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }
}
