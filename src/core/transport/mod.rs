//! Transport layer for the gateway.
//!
//! This module provides different transport implementations:
//! - **HTTP**: REST endpoints for tool discovery and execution - feature: `http`
//! - **STDIO**: MCP over standard input/output - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates tool calls
//! to the shared dispatcher held by [`GatewayServer`](crate::core::GatewayServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
