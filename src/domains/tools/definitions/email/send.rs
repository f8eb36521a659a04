//! Send email tool definition.
//!
//! Mock sender: logs the message and returns a provider-shaped receipt.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::common::mock_message_id;
use crate::domains::tools::{
    FieldKind, FieldSpec, HandlerResult, SchemaDescriptor, ToolError, ToolRegistry,
    ValidatedInput, handler_fn,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the send tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailParams {
    /// Recipient address.
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// Plain-text body.
    pub body: String,
}

/// Receipt returned after a (mock) send.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailReceipt {
    pub status: &'static str,
    pub to: String,
    pub subject: String,
    pub message_id: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Send email tool.
pub struct SendEmailTool;

impl SendEmailTool {
    /// Tool name as exposed to clients.
    pub const NAME: &'static str = "sendEmail";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Send an email. This is a mock sender: the message is logged and a receipt is returned.";

    pub fn schema() -> Result<SchemaDescriptor, ToolError> {
        SchemaDescriptor::new(vec![
            FieldSpec::required("to", FieldKind::String).describe("Recipient email address"),
            FieldSpec::with_default("subject", FieldKind::String, "").describe("Subject line"),
            FieldSpec::with_default("body", FieldKind::String, "").describe("Plain-text body"),
        ])
        .map_err(|e| ToolError::invalid_schema(Self::NAME, e))
    }

    /// Execute the tool logic.
    pub fn execute(params: &SendEmailParams) -> SendEmailReceipt {
        let now = Utc::now();
        info!(to = %params.to, subject = %params.subject, "Sending mock email");
        debug!(body = %params.body, "Mock email body");

        SendEmailReceipt {
            status: "sent",
            to: params.to.clone(),
            subject: params.subject.clone(),
            message_id: mock_message_id(now),
        }
    }

    /// Handler entry point: map validated input onto params and execute.
    pub fn handle(input: ValidatedInput) -> HandlerResult {
        let params: SendEmailParams = input.into_params()?;
        Ok(serde_json::to_value(Self::execute(&params))?)
    }

    /// Register this tool.
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
    use crate::domains::tools::validate;
    use serde_json::{Value, json};

    fn run(payload: Value) -> Result<Value, String> {
        let input = validate(&SendEmailTool::schema().unwrap(), &payload).map_err(|e| e.to_string())?;
        SendEmailTool::handle(input).map_err(|e| e.to_string())
    }

    #[test]
    fn test_send_returns_receipt() {
        let receipt = run(json!({
            "to": "a@b.com",
            "subject": "Hello",
            "body": "Hi there"
        }))
        .unwrap();
        assert_eq!(receipt["status"], "sent");
        assert_eq!(receipt["to"], "a@b.com");
        assert_eq!(receipt["subject"], "Hello");
        assert!(receipt["messageId"].as_str().unwrap().starts_with("mock-"));
    }

    #[test]
    fn test_send_defaults_subject() {
        let receipt = run(json!({ "to": "a@b.com" })).unwrap();
        assert_eq!(receipt["subject"], "");
    }

    #[test]
    fn test_send_requires_recipient() {
        let err = run(json!({ "subject": "Hello" })).unwrap_err();
        assert!(err.contains("'to'"));
    }
}
