//! Configuration management for the gateway.
//!
//! Configuration starts from defaults and is overridden by environment
//! variables prefixed with `GATEWAY_`. A `.env` file in the working
//! directory is loaded first when present.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Dispatch behaviour.
    pub dispatch: DispatchConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-call handler timeout in milliseconds. `None` means unbounded.
    pub tool_timeout_ms: Option<u64>,
}

impl DispatchConfig {
    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_ms.map(Duration::from_millis)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "email-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            dispatch: DispatchConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `GATEWAY_SERVER_NAME`, `GATEWAY_LOG_LEVEL`,
    /// `GATEWAY_TOOL_TIMEOUT_MS` plus the transport variables read by
    /// [`TransportConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("GATEWAY_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("GATEWAY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(raw) = std::env::var("GATEWAY_TOOL_TIMEOUT_MS") {
            config.dispatch.tool_timeout_ms = parse_timeout(&raw)?;
        }

        config.transport = TransportConfig::from_env()?;

        Ok(config)
    }
}

/// Parse a timeout in milliseconds; `0` or an empty value disables it.
fn parse_timeout(raw: &str) -> Result<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u64>() {
        Ok(0) => {
            warn!("GATEWAY_TOOL_TIMEOUT_MS=0, tool calls run without a timeout");
            Ok(None)
        }
        Ok(ms) => Ok(Some(ms)),
        Err(e) => Err(Error::config(format!(
            "GATEWAY_TOOL_TIMEOUT_MS must be a number of milliseconds, got '{raw}': {e}"
        ))),
    }
}
