//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// REST tool gateway over HTTP (default).
    #[cfg(feature = "http")]
    Http(HttpConfig),

    /// MCP over standard input/output.
    #[cfg(feature = "stdio")]
    Stdio,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    8000
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "http", feature = "stdio")))]
        {
            compile_error!("At least one transport feature must be enabled: http or stdio");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Load transport config from environment variables.
    ///
    /// `GATEWAY_TRANSPORT` selects `http` or `stdio`; HTTP reads
    /// `GATEWAY_HTTP_HOST`, `GATEWAY_HTTP_PORT` and `GATEWAY_HTTP_CORS`.
    pub fn from_env() -> Result<Self> {
        let transport = std::env::var("GATEWAY_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            #[cfg(feature = "http")]
            "" | "http" => {
                let port = match std::env::var("GATEWAY_HTTP_PORT") {
                    Ok(p) => p.trim().parse().map_err(|e| {
                        Error::config(format!("GATEWAY_HTTP_PORT must be a port number, got '{p}': {e}"))
                    })?,
                    Err(_) => default_port(),
                };
                let host = std::env::var("GATEWAY_HTTP_HOST").unwrap_or_else(|_| default_host());
                let enable_cors = std::env::var("GATEWAY_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or_else(|_| default_cors());
                Ok(Self::Http(HttpConfig {
                    port,
                    host,
                    enable_cors,
                }))
            }
            #[cfg(not(feature = "http"))]
            "" => Ok(Self::default()),
            other => Err(Error::config(format!(
                "Unsupported GATEWAY_TRANSPORT '{other}' for this build"
            ))),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}", cfg.address()),
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (MCP)".to_string(),
        }
    }
}
