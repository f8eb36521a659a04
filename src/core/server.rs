//! Gateway server implementation and lifecycle management.
//!
//! [`GatewayServer`] owns the sealed tool registry (through the dispatcher)
//! and is shared by every transport. The HTTP transport calls the plain
//! methods below; the STDIO transport drives it as an rmcp `ServerHandler`.
//!
//! Construction is the registration phase: the registry is built, sealed
//! and only then handed to the dispatcher, so no call can observe a
//! partially registered set of tools.

use std::sync::Arc;

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use serde_json::{Value, json};
use tracing::info;

use super::config::Config;
use crate::domains::tools::{
    Dispatcher, InvocationRequest, InvocationResult, ToolRegistry, ToolSummary,
    build_tool_router, builtin_registry,
};

/// The gateway server.
#[derive(Clone)]
pub struct GatewayServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the sealed registry.
    dispatcher: Arc<Dispatcher>,

    /// Tool router for MCP clients.
    tool_router: ToolRouter<Self>,
}

impl GatewayServer {
    /// Create a server exposing the built-in email tools.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let registry = builtin_registry()?;
        Self::with_registry(config, registry)
    }

    /// Create a server over a caller-supplied registry.
    ///
    /// Fails if the registry has not been sealed.
    pub fn with_registry(config: Config, registry: Arc<ToolRegistry>) -> crate::core::Result<Self> {
        let config = Arc::new(config);
        let dispatcher = Arc::new(
            Dispatcher::new(registry)?.with_timeout(config.dispatch.tool_timeout()),
        );
        info!(
            "Server ready with {} tool(s): {}",
            dispatcher.registry().len(),
            dispatcher.registry().names().join(", ")
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(Arc::clone(&dispatcher)),
            config,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// All tools in registration order.
    pub fn list_tools(&self) -> Vec<ToolSummary> {
        self.dispatcher.registry().list_all()
    }

    /// Tool names in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.list_tools().into_iter().map(|t| t.name).collect()
    }

    /// Tools with their JSON input schemas.
    pub fn describe_tools(&self) -> Vec<Value> {
        self.dispatcher
            .registry()
            .definitions()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema.to_json_schema()
                })
            })
            .collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.dispatcher.registry().contains(name)
    }

    /// Call a tool by name with an untyped payload.
    pub async fn call_tool(&self, name: &str, payload: Value) -> InvocationResult {
        self.dispatcher
            .dispatch(InvocationRequest::new(name, payload))
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for GatewayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Email tool gateway. Use the tools to send, list, read and delete (mock) emails."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
