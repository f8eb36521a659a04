//! Delete email tool definition.
//!
//! Deletion is guarded by a `confirm` flag. Without it the tool answers with
//! a refusal payload instead of an error: the call itself succeeded, the
//! mailbox was simply left untouched.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::domains::tools::{
    FieldKind, FieldSpec, HandlerResult, SchemaDescriptor, ToolError, ToolRegistry,
    ValidatedInput, handler_fn,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmailParams {
    pub message_id: String,
    pub confirm: bool,
}

/// Delete email tool.
pub struct DeleteEmailTool;

impl DeleteEmailTool {
    pub const NAME: &'static str = "deleteEmail";

    pub const DESCRIPTION: &'static str =
        "Delete an email by message id. Requires confirm=true; otherwise nothing is deleted.";

    pub fn schema() -> Result<SchemaDescriptor, ToolError> {
        SchemaDescriptor::new(vec![
            FieldSpec::required("messageId", FieldKind::String)
                .describe("Id of the message to delete"),
            FieldSpec::with_default("confirm", FieldKind::Boolean, false)
                .describe("Must be true to actually delete"),
        ])
        .map_err(|e| ToolError::invalid_schema(Self::NAME, e))
    }

    pub fn execute(params: &DeleteEmailParams) -> Value {
        if !params.confirm {
            warn!(message_id = %params.message_id, "Delete refused: confirmation missing");
            return json!({
                "status": "refused",
                "messageId": params.message_id,
                "error": "Confirmation required: set confirm=true to delete this message"
            });
        }

        info!(message_id = %params.message_id, "Deleting mock email");
        json!({
            "status": "deleted",
            "messageId": params.message_id
        })
    }

    pub fn handle(input: ValidatedInput) -> HandlerResult {
        let params: DeleteEmailParams = input.into_params()?;
        Ok(Self::execute(&params))
    }

    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(
            Self::NAME,
            Self::schema()?,
            handler_fn(|input| async move { Self::handle(input) }),
            Self::DESCRIPTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_without_confirmation_refuses() {
        let result = DeleteEmailTool::execute(&DeleteEmailParams {
            message_id: "mock-inbox-002".to_string(),
            confirm: false,
        });
        assert_eq!(result["status"], "refused");
        assert!(result["error"].as_str().unwrap().contains("Confirmation required"));
    }

    #[test]
    fn test_delete_with_confirmation() {
        let result = DeleteEmailTool::execute(&DeleteEmailParams {
            message_id: "mock-inbox-002".to_string(),
            confirm: true,
        });
        assert_eq!(result, json!({ "status": "deleted", "messageId": "mock-inbox-002" }));
    }
}
