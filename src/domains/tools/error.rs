//! Tool-specific error types.

use thiserror::Error;

use super::schema::SchemaError;

/// Errors raised by the tool registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateName(String),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Registration was attempted after the registry was sealed.
    #[error("Registry is sealed, cannot register '{0}'")]
    RegistrySealed(String),

    /// Dispatch was requested over a registry still in its build phase.
    #[error("Registry must be sealed before serving")]
    RegistryNotSealed,

    /// A tool's input schema is malformed.
    #[error("Invalid schema for '{tool}': {source}")]
    InvalidSchema {
        tool: String,
        #[source]
        source: SchemaError,
    },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid schema" error.
    pub fn invalid_schema(tool: impl Into<String>, source: SchemaError) -> Self {
        Self::InvalidSchema {
            tool: tool.into(),
            source,
        }
    }
}

/// Errors a tool handler may return while executing.
///
/// Any of these surfaces to callers as a handler fault.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Validated input could not be mapped onto the handler's params.
    #[error("Invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),
}

impl HandlerError {
    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}
