//! List emails tool definition.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::{DEFAULT_LIMIT, FOLDERS, MessageSummary, clamp_limit, sample_messages};
use crate::domains::tools::{
    FieldKind, FieldSpec, HandlerResult, SchemaDescriptor, ToolError, ToolRegistry,
    ValidatedInput, handler_fn,
};

/// Parameters for the list tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEmailsParams {
    pub folder: String,
    pub limit: i64,
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEmailsResult {
    pub folder: String,
    pub messages: Vec<MessageSummary>,
    pub total_count: usize,
}

/// List emails tool - returns a page of canned messages from a folder.
pub struct ListEmailsTool;

impl ListEmailsTool {
    pub const NAME: &'static str = "listEmails";

    pub const DESCRIPTION: &'static str =
        "List recent emails in a mailbox folder. Returns mock message summaries.";

    pub fn schema() -> Result<SchemaDescriptor, ToolError> {
        SchemaDescriptor::new(vec![
            FieldSpec::with_default("folder", FieldKind::one_of(FOLDERS), "inbox")
                .describe("Mailbox folder to list"),
            FieldSpec::with_default("limit", FieldKind::Integer, DEFAULT_LIMIT)
                .describe("Maximum number of messages (1-50)"),
            FieldSpec::with_default("unreadOnly", FieldKind::Boolean, false)
                .describe("Only return unread messages"),
        ])
        .map_err(|e| ToolError::invalid_schema(Self::NAME, e))
    }

    pub fn execute(params: &ListEmailsParams) -> ListEmailsResult {
        let limit = clamp_limit(params.limit);
        info!(folder = %params.folder, limit, unread_only = params.unread_only, "Listing mock emails");

        let matching: Vec<_> = sample_messages(&params.folder, Utc::now())
            .into_iter()
            .filter(|m| !params.unread_only || m.unread)
            .collect();
        let total_count = matching.len();

        ListEmailsResult {
            folder: params.folder.clone(),
            messages: matching.into_iter().take(limit).collect(),
            total_count,
        }
    }

    pub fn handle(input: ValidatedInput) -> HandlerResult {
        let params: ListEmailsParams = input.into_params()?;
        Ok(serde_json::to_value(Self::execute(&params))?)
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
    use crate::domains::tools::validate;
    use serde_json::{Value, json};

    fn run(payload: Value) -> Value {
        let input = validate(&ListEmailsTool::schema().unwrap(), &payload).unwrap();
        ListEmailsTool::handle(input).unwrap()
    }

    #[test]
    fn test_list_defaults_to_inbox() {
        let result = run(json!({}));
        assert_eq!(result["folder"], "inbox");
        assert_eq!(result["messages"].as_array().unwrap().len(), 10);
        assert_eq!(result["totalCount"], 12);
    }

    #[test]
    fn test_list_unread_only() {
        let result = run(json!({ "unreadOnly": "yes", "limit": "50" }));
        let messages = result["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert!(messages.iter().all(|m| m["unread"] == true));
    }

    #[test]
    fn test_list_clamps_limit() {
        let result = run(json!({ "folder": "sent", "limit": 0 }));
        assert_eq!(result["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_list_rejects_unknown_folder() {
        let err = validate(&ListEmailsTool::schema().unwrap(), &json!({ "folder": "spam" }));
        assert!(err.is_err());
    }
}
