//! Dispatcher - runs a named tool call against the sealed registry.
//!
//! Every call goes through the same four steps, each terminal on failure:
//!
//! 1. **resolve** the tool by name ([`ErrorKind::UnknownTool`])
//! 2. **validate** the raw payload against its schema ([`ErrorKind::InvalidInput`])
//! 3. **execute** the handler ([`ErrorKind::HandlerFault`], [`ErrorKind::Timeout`])
//! 4. **normalize** the returned value into [`InvocationResult::Success`]
//!
//! The dispatcher never inspects what a handler returns. A value that
//! describes a domain-level refusal is still a success. A handler that
//! panics is reported as a fault and no guarantee is made about side
//! effects it performed before panicking.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validator::validate;

/// A single inbound tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub tool_name: String,
    pub raw_payload: Value,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, raw_payload: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            raw_payload,
        }
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownTool,
    InvalidInput,
    HandlerFault,
    Timeout,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownTool => "UnknownTool",
            Self::InvalidInput => "InvalidInput",
            Self::HandlerFault => "HandlerFault",
            Self::Timeout => "Timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dispatched call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvocationResult {
    Success { value: Value },
    Failure { kind: ErrorKind, message: String },
}

impl InvocationResult {
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure kind, if this is a failure.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Dispatches tool calls over a sealed [`ToolRegistry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher. The registry must already be sealed.
    pub fn new(registry: Arc<ToolRegistry>) -> Result<Self, ToolError> {
        if !registry.is_sealed() {
            return Err(ToolError::RegistryNotSealed);
        }
        Ok(Self {
            registry,
            timeout: None,
        })
    }

    /// Bound each handler execution by `timeout`. `None` disables the limit.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Run a tool call through resolve, validate, execute and normalize.
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub async fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        let tool = match self.registry.lookup(&request.tool_name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Unknown tool requested: {}", request.tool_name);
                return InvocationResult::failure(ErrorKind::UnknownTool, e.to_string());
            }
        };

        let input = match validate(&tool.input_schema, &request.raw_payload) {
            Ok(input) => input,
            Err(e) => {
                info!("Rejected payload: {}", e);
                return InvocationResult::failure(ErrorKind::InvalidInput, e.to_string());
            }
        };

        debug!("Executing tool");
        let execution = AssertUnwindSafe(tool.handler.call(input)).catch_unwind();

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, execution).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("Tool timed out after {:?}", limit);
                    return InvocationResult::failure(
                        ErrorKind::Timeout,
                        format!("Tool '{}' timed out after {} ms", tool.name, limit.as_millis()),
                    );
                }
            },
            None => execution.await,
        };

        match outcome {
            Ok(Ok(value)) => InvocationResult::success(value),
            Ok(Err(e)) => {
                warn!("Tool failed: {}", e);
                InvocationResult::failure(ErrorKind::HandlerFault, e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!("Tool panicked: {}", message);
                InvocationResult::failure(ErrorKind::HandlerFault, message)
            }
        }
    }

    /// Convenience wrapper around [`Dispatcher::dispatch`].
    pub async fn call(&self, tool_name: &str, raw_payload: Value) -> InvocationResult {
        self.dispatch(InvocationRequest::new(tool_name, raw_payload))
            .await
    }
}

/// Extract the message carried by a panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
