//! Tools domain module.
//!
//! This module handles all tool-related functionality: declaring input
//! schemas, registering tools, validating payloads and dispatching calls.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Declarative input schemas
//! - `validator.rs` - Payload validation against a schema
//! - `registry.rs` - Two-phase tool registry (build, then sealed)
//! - `dispatcher.rs` - Resolve, validate, execute and normalize a call
//! - `handlers.rs` - The handler trait tools implement
//! - `router.rs` - MCP tool router built from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a schema, params and `register()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Call its `register()` from `register_all_tools()` in `registry.rs`

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;
pub mod router;
mod schema;
mod validator;

pub use dispatcher::{Dispatcher, ErrorKind, InvocationRequest, InvocationResult, panic_message};
pub use error::{HandlerError, ToolError};
pub use handlers::{FnHandler, HandlerResult, ToolHandler, handler_fn};
pub use registry::{
    ToolDefinition, ToolRegistry, ToolSummary, builtin_registry, register_all_tools,
};
pub use router::build_tool_router;
pub use schema::{FieldKind, FieldSpec, SchemaDescriptor, SchemaError};
pub use validator::{ValidatedInput, ValidationError, validate};
