//! Integration tests for the HTTP gateway routes.

#![cfg(feature = "http")]

use std::time::Duration;

use axum::{Router, body::Body};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use email_tool_gateway::core::Config;
use email_tool_gateway::core::GatewayServer;
use email_tool_gateway::core::transport::http::{AppState, build_router};
use email_tool_gateway::domains::tools::{
    FieldKind, FieldSpec, HandlerError, SchemaDescriptor, ToolRegistry, handler_fn,
    register_all_tools,
};

/// Built-in email tools plus a few tools exercising each failure path.
fn test_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry).expect("builtins");

    registry
        .register(
            "echo",
            SchemaDescriptor::new(vec![FieldSpec::required("text", FieldKind::String)])
                .expect("schema"),
            handler_fn(|input| async move { Ok(json!({ "echoed": input.str("text") })) }),
            "Echo the input text",
        )
        .expect("echo");
    registry
        .register(
            "broken",
            SchemaDescriptor::empty(),
            handler_fn(|_| async { Err(HandlerError::execution_failed("mailbox unavailable")) }),
            "Always fails",
        )
        .expect("broken");
    registry
        .register(
            "slow",
            SchemaDescriptor::empty(),
            handler_fn(|_| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(json!("done"))
            }),
            "Never finishes in time",
        )
        .expect("slow");
    registry
}

fn test_app() -> Router {
    let mut config = Config::default();
    config.dispatch.tool_timeout_ms = Some(50);
    let server =
        GatewayServer::with_registry(config, test_registry().into_shared()).expect("server");
    build_router(AppState::new(server), false)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("resp");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(json!({}));
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).expect("req");
    send(test_app(), req).await
}

async fn post(uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("req");
    send(test_app(), req).await
}

// ============================================================================
// Discovery
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn root_reports_service_info() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "email-server");
}

#[tokio::test]
async fn list_tools_in_registration_order() {
    let (status, body) = get("/tools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tools"],
        json!([
            "sendEmail",
            "listEmails",
            "readEmail",
            "deleteEmail",
            "echo",
            "broken",
            "slow"
        ])
    );
}

#[tokio::test]
async fn list_tools_detailed_includes_schema() {
    let (status, body) = get("/tools?detailed=true").await;
    assert_eq!(status, StatusCode::OK);
    let first = &body["tools"][0];
    assert_eq!(first["name"], "sendEmail");
    assert_eq!(first["inputSchema"]["required"], json!(["to"]));
}

#[tokio::test]
async fn get_known_tool() {
    let (status, body) = get("/tools/sendEmail").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tool": "sendEmail" }));
}

#[tokio::test]
async fn get_unknown_tool_is_404() {
    let (status, body) = get("/tools/sendFax").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Tool not found");
}

// ============================================================================
// Execution
// ============================================================================

#[tokio::test]
async fn call_echo() {
    let (status, body) = post("/tools/echo", r#"{"text":"hi"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": { "echoed": "hi" } }));
}

#[tokio::test]
async fn call_send_email() {
    let (status, body) = post(
        "/tools/sendEmail",
        r#"{"to":"a@b.com","subject":"Hello","body":"Hi","cc":"ignored@b.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "sent");
    assert_eq!(body["result"]["to"], "a@b.com");
}

#[tokio::test]
async fn call_unknown_tool_is_404() {
    let (status, body) = post("/tools/sendFax", r#"{"to":"a@b.com"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "UnknownTool");
    assert_eq!(body["detail"], "Tool not found");
}

#[tokio::test]
async fn missing_field_is_400() {
    let (status, body) = post("/tools/sendEmail", r#"{"subject":"Hello"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
    assert_eq!(body["detail"], "Missing required field 'to'");
}

#[tokio::test]
async fn type_mismatch_is_400() {
    let (status, body) = post("/tools/sendEmail", r#"{"to":5}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (status, body) = post("/tools/echo", r#"{"text":"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
}

#[tokio::test]
async fn non_object_body_is_400() {
    let (status, body) = post("/tools/echo", r#"["hi"]"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
}

#[tokio::test]
async fn empty_body_uses_defaults() {
    let (status, body) = post("/tools/listEmails", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["folder"], "inbox");
}

#[tokio::test]
async fn handler_fault_is_500() {
    let (status, body) = post("/tools/broken", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "HandlerFault");
    assert_eq!(body["detail"], "Execution failed: mailbox unavailable");
}

#[tokio::test]
async fn timeout_is_504() {
    let (status, body) = post("/tools/slow", "{}").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Timeout");
}

#[tokio::test]
async fn blank_read_id_is_soft_refusal() {
    let (status, body) = post("/tools/readEmail", r#"{"messageId":""}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "refused");
    assert_eq!(body["result"]["error"], "messageId must not be empty");
}

#[tokio::test]
async fn unconfirmed_delete_is_soft_refusal() {
    let (status, body) = post("/tools/deleteEmail", r#"{"messageId":"mock-inbox-001"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "refused");
    assert!(body["result"]["error"].is_string());
}
