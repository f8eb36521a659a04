//! Payload validation against a [`SchemaDescriptor`].
//!
//! Validation policy:
//! - Fields are checked in declaration order and the first failure is
//!   reported. There is no partial result.
//! - A missing required field fails with [`ValidationError::MissingField`].
//!   A missing optional field takes its default, or `null` without one.
//!   An explicit JSON `null` is treated as missing.
//! - Undeclared keys in the payload are ignored (open-world tolerance).
//! - Coercion is lax: booleans accept `"true"`/`"false"`/`"yes"`/`"no"`/
//!   `"on"`/`"off"`/`"1"`/`"0"` and the integers `0`/`1`; integers accept
//!   floats without a fractional part and numeric strings. Strings are
//!   never coerced from other types.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::schema::{FieldKind, FieldSpec, SchemaDescriptor};

/// Reasons a payload can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is absent (or `null`).
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A field is present but cannot be read as its declared kind.
    #[error("Field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: Value,
    },

    /// The payload itself is not a JSON object.
    #[error("Payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ValidationError {
    /// Name of the offending field, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::TypeMismatch { field, .. } => Some(field),
            Self::NotAnObject(_) => None,
        }
    }
}

/// A payload that passed validation.
///
/// Holds exactly the declared fields with their resolved values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInput {
    values: Map<String, Value>,
}

impl ValidatedInput {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Deserialize the resolved fields into a typed params struct.
    pub fn into_params<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.values))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Validate `payload` against `schema`.
pub fn validate(schema: &SchemaDescriptor, payload: &Value) -> Result<ValidatedInput, ValidationError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_type_name(payload)))?;

    let mut values = Map::new();
    for field in schema.fields() {
        let resolved = match object.get(&field.name).filter(|v| !v.is_null()) {
            Some(raw) => coerce(field, raw)?,
            None if field.required => {
                return Err(ValidationError::MissingField {
                    field: field.name.clone(),
                });
            }
            None => field.default.clone().unwrap_or(Value::Null),
        };
        values.insert(field.name.clone(), resolved);
    }

    Ok(ValidatedInput { values })
}

fn coerce(field: &FieldSpec, raw: &Value) -> Result<Value, ValidationError> {
    let coerced = match &field.kind {
        FieldKind::String => raw.as_str().map(|s| Value::String(s.to_string())),
        FieldKind::Boolean => coerce_bool(raw).map(Value::Bool),
        FieldKind::Integer => coerce_int(raw).map(Value::from),
        FieldKind::Enum(allowed) => raw
            .as_str()
            .filter(|s| allowed.iter().any(|a| a == s))
            .map(|s| Value::String(s.to_string())),
    };

    coerced.ok_or_else(|| ValidationError::TypeMismatch {
        field: field.name.clone(),
        expected: field.kind.describe(),
        actual: raw.clone(),
    })
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// 2^63, the first float outside the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn coerce_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) if n.is_u64() => n.as_i64(),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= -I64_LIMIT && *f < I64_LIMIT)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
