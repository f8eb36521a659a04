//! Email Tool Gateway Library
//!
//! A minimal tool-invocation gateway: named tools with declared input
//! schemas are registered once at startup and exposed for discovery and
//! execution over HTTP (and MCP over stdio).
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: schemas, validation, the sealed registry, the dispatcher
//!     and the mock email tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use email_tool_gateway::core::{Config, GatewayServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = GatewayServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, GatewayServer, Result};
