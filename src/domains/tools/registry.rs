//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry has two phases:
//! - **build**: tools are appended with [`ToolRegistry::register`] at startup.
//! - **sealed**: after [`ToolRegistry::seal`] the registry is read-only and is
//!   shared behind an `Arc` for concurrent lookups.
//!
//! Registration order is preserved and drives [`ToolRegistry::list_all`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::definitions::{DeleteEmailTool, ListEmailsTool, ReadEmailTool, SendEmailTool};
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::schema::SchemaDescriptor;

/// A registered tool.
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: SchemaDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}

/// Discovery entry returned by [`ToolRegistry::list_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
}

/// Tool registry - maps tool names to their definitions.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<ToolDefinition>>,
    index: HashMap<String, usize>,
    sealed: bool,
}

impl ToolRegistry {
    /// Create an empty registry in its build phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails without modifying the registry if the name is taken or the
    /// registry is already sealed.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        input_schema: SchemaDescriptor,
        handler: Arc<dyn ToolHandler>,
        description: impl Into<String>,
    ) -> Result<(), ToolError> {
        let name = name.into();

        if self.sealed {
            return Err(ToolError::RegistrySealed(name));
        }
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }

        debug!("Registering tool: {}", name);
        self.index.insert(name.clone(), self.tools.len());
        self.tools.push(Arc::new(ToolDefinition {
            name,
            description: description.into(),
            input_schema,
            handler,
        }));
        Ok(())
    }

    /// End the build phase. Further registrations fail.
    pub fn seal(&mut self) {
        if !self.sealed {
            info!("Tool registry sealed with {} tool(s)", self.tools.len());
            self.sealed = true;
        }
    }

    /// Seal and wrap for sharing across tasks.
    pub fn into_shared(mut self) -> Arc<Self> {
        self.seal();
        Arc::new(self)
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<ToolDefinition>, ToolError> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i]))
            .ok_or_else(|| ToolError::not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All tools in registration order.
    pub fn list_all(&self) -> Vec<ToolSummary> {
        self.tools
            .iter()
            .map(|t| ToolSummary {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Full definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<ToolDefinition>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Register every built-in tool.
///
/// This is the central place where tools are registered; the order here is
/// the order clients see when listing tools.
pub fn register_all_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    SendEmailTool::register(registry)?;
    ListEmailsTool::register(registry)?;
    ReadEmailTool::register(registry)?;
    DeleteEmailTool::register(registry)?;
    Ok(())
}

/// Build the sealed registry holding all built-in tools.
pub fn builtin_registry() -> Result<Arc<ToolRegistry>, ToolError> {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry)?;
    Ok(registry.into_shared())
}
