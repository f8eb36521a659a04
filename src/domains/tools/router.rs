//! Tool Router - exposes the registry to MCP clients.
//!
//! Builds an rmcp `ToolRouter` with one route per registered tool. Every
//! route forwards to the shared [`Dispatcher`], so MCP calls get exactly the
//! same validation and fault handling as HTTP calls.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, Tool},
};
use serde_json::Value;

use super::dispatcher::{Dispatcher, ErrorKind, InvocationRequest, InvocationResult};
use super::registry::ToolDefinition;

/// Describe a registered tool as an MCP `Tool`.
pub fn to_mcp_tool(definition: &ToolDefinition) -> Tool {
    Tool {
        name: definition.name.clone().into(),
        description: Some(definition.description.clone().into()),
        input_schema: Arc::new(definition.input_schema.to_json_schema()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Map a dispatch outcome onto an MCP tool result.
///
/// Invalid input is a protocol-level error; handler faults and timeouts are
/// reported as tool results with `isError` set.
pub fn to_call_tool_result(result: InvocationResult) -> Result<CallToolResult, McpError> {
    match result {
        InvocationResult::Success { value } => {
            let text = match &value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        InvocationResult::Failure { kind, message } => match kind {
            ErrorKind::UnknownTool | ErrorKind::InvalidInput => {
                Err(McpError::invalid_params(message, None))
            }
            ErrorKind::HandlerFault | ErrorKind::Timeout => Ok(CallToolResult::error(vec![
                Content::text(format!("{kind}: {message}")),
            ])),
        },
    }
}

/// Build the tool router with every tool in the dispatcher's registry.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for definition in dispatcher.registry().definitions() {
        let name = definition.name.clone();
        let dispatcher = Arc::clone(&dispatcher);

        router = router.with_route(ToolRoute::new_dyn(
            to_mcp_tool(definition),
            move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone().unwrap_or_default();
                let request = InvocationRequest::new(name.clone(), Value::Object(args));
                let dispatcher = Arc::clone(&dispatcher);
                async move { to_call_tool_result(dispatcher.dispatch(request).await) }.boxed()
            },
        ));
    }
    router
}
