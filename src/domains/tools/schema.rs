//! Declarative input schemas for tools.
//!
//! A [`SchemaDescriptor`] lists the fields a tool accepts, in declaration
//! order. Each field has a primitive [`FieldKind`], is either required or
//! optional, and optional fields may carry a default value.
//!
//! Descriptors are plain data: the validator in `validator.rs` walks them,
//! and [`SchemaDescriptor::to_json_schema`] renders them for discovery.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields share the same name.
    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    /// An enum field was declared without any allowed value.
    #[error("Enum field '{0}' has no allowed values")]
    EmptyEnum(String),
}

/// Primitive kind of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    /// A string restricted to a closed set of values.
    Enum(Vec<String>),
}

impl FieldKind {
    /// Build an enum kind from any list of string-likes.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Human readable name used in validation messages.
    pub fn describe(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Enum(values) => format!("one of [{}]", values.join(", ")),
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Enum(values) => json!({ "type": "string", "enum": values }),
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,

    /// Value substituted when an optional field is absent.
    /// `None` yields a present-but-null field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// A field that must be present in every payload.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: None,
        }
    }

    /// An optional field without a default.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
            description: None,
        }
    }

    /// An optional field that falls back to `default` when absent.
    pub fn with_default(name: impl Into<String>, kind: FieldKind, default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..Self::optional(name, kind)
        }
    }

    /// Attach a description shown in discovery output.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered set of fields a tool accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    /// Build a descriptor, rejecting duplicate field names and empty enums.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if matches!(&field.kind, FieldKind::Enum(values) if values.is_empty()) {
                return Err(SchemaError::EmptyEnum(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// A descriptor that accepts any object and yields no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON Schema object.
    ///
    /// `additionalProperties` is left open since undeclared keys are
    /// accepted and ignored by the validator.
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = field.kind.json_schema();
            if let Some(obj) = prop.as_object_mut() {
                if let Some(default) = &field.default {
                    obj.insert("default".to_string(), default.clone());
                }
                if let Some(description) = &field.description {
                    obj.insert("description".to_string(), json!(description));
                }
            }
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
            properties.insert(field.name.clone(), prop);
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }
}
