//! Read email tool definition.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::domains::tools::{
    FieldKind, FieldSpec, HandlerResult, SchemaDescriptor, ToolError, ToolRegistry,
    ValidatedInput, handler_fn,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadEmailParams {
    pub message_id: String,
}

/// Read email tool - returns the full content of one message.
pub struct ReadEmailTool;

impl ReadEmailTool {
    pub const NAME: &'static str = "readEmail";

    pub const DESCRIPTION: &'static str =
        "Read a single email by message id. Returns a mock message body.";

    pub fn schema() -> Result<SchemaDescriptor, ToolError> {
        SchemaDescriptor::new(vec![
            FieldSpec::required("messageId", FieldKind::String)
                .describe("Id of the message to read"),
        ])
        .map_err(|e| ToolError::invalid_schema(Self::NAME, e))
    }

    pub fn execute(params: &ReadEmailParams) -> Value {
        if params.message_id.trim().is_empty() {
            warn!("Read refused: blank message id");
            return json!({
                "status": "refused",
                "messageId": params.message_id,
                "error": "messageId must not be empty"
            });
        }
        info!(message_id = %params.message_id, "Reading mock email");

        json!({
            "messageId": params.message_id,
            "from": "sender@example.com",
            "to": "me@example.com",
            "subject": format!("Mock message {}", params.message_id),
            "body": "This is a mock email body. No mail provider was contacted.",
            "receivedAt": Utc::now().to_rfc3339(),
            "unread": false
        })
    }

    pub fn handle(input: ValidatedInput) -> HandlerResult {
        let params: ReadEmailParams = input.into_params()?;
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
    fn test_read_returns_message() {
        let params = ReadEmailParams {
            message_id: "mock-inbox-001".to_string(),
        };
        let message = ReadEmailTool::execute(&params);
        assert_eq!(message["messageId"], "mock-inbox-001");
        assert_eq!(message["subject"], "Mock message mock-inbox-001");
    }

    #[test]
    fn test_read_blank_id_is_refused() {
        let params = ReadEmailParams {
            message_id: "   ".to_string(),
        };
        let result = ReadEmailTool::execute(&params);
        assert_eq!(result["status"], "refused");
        assert_eq!(result["error"], "messageId must not be empty");
    }
}
