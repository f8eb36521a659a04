//! HTTP transport implementation.
//!
//! REST surface over the tool registry:
//!
//! | Method | Path           | Purpose                              |
//! |--------|----------------|--------------------------------------|
//! | GET    | `/`            | Service info                         |
//! | GET    | `/health`      | Liveness                             |
//! | GET    | `/tools`       | List tool names (`?detailed=true`)   |
//! | GET    | `/tools/{name}`| Check that a tool exists             |
//! | POST   | `/tools/{name}`| Call a tool with a JSON object body  |
//!
//! Every failure is rendered as `{"error": <kind>, "detail": <message>}`.

use std::any::Any;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::GatewayServer;
use crate::domains::tools::{ErrorKind, InvocationResult, panic_message};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub server: GatewayServer,
}

impl AppState {
    pub fn new(server: GatewayServer) -> Self {
        Self { server }
    }
}

/// Error responses produced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Tool not found")]
    ToolNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    HandlerFault(String),

    #[error("{0}")]
    Timeout(String),
}

impl ApiError {
    /// Map a dispatcher failure onto an API error.
    pub fn from_failure(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::UnknownTool => Self::ToolNotFound,
            ErrorKind::InvalidInput => Self::InvalidInput(message),
            ErrorKind::HandlerFault => Self::HandlerFault(message),
            ErrorKind::Timeout => Self::Timeout(message),
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolNotFound => ErrorKind::UnknownTool,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::HandlerFault(_) => ErrorKind::HandlerFault,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::ToolNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::HandlerFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::HandlerFault(msg) => error!(error = %msg, "Tool fault"),
            Self::Timeout(msg) => warn!(error = %msg, "Tool timeout"),
            Self::ToolNotFound | Self::InvalidInput(_) => {}
        }

        let body = Json(json!({
            "error": self.kind().as_str(),
            "detail": self.to_string()
        }));
        (status, body).into_response()
    }
}

/// Query string accepted by `GET /tools`.
#[derive(Debug, Default, Deserialize)]
pub struct ListToolsQuery {
    #[serde(default)]
    pub detailed: bool,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl+C or SIGTERM.
    pub async fn run(self, server: GatewayServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(AppState::new(server), self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Tools:  GET/POST /tools/{{name}}");
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router with all gateway routes.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", get(get_tool).post(call_tool))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "health": "/health",
            "tools": "/tools",
            "tool": "/tools/{name}"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// List registered tools.
async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<ListToolsQuery>,
) -> impl IntoResponse {
    if query.detailed {
        Json(json!({ "tools": state.server.describe_tools() }))
    } else {
        Json(json!({ "tools": state.server.tool_names() }))
    }
}

/// Check that a tool exists.
async fn get_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.server.has_tool(&name) {
        return Err(ApiError::ToolNotFound);
    }
    Ok(Json(json!({ "tool": name })))
}

/// Execute a tool.
#[instrument(skip(state, body))]
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = parse_payload(&body)?;

    match state.server.call_tool(&name, payload).await {
        InvocationResult::Success { value } => Ok(Json(json!({ "result": value }))),
        InvocationResult::Failure { kind, message } => {
            Err(ApiError::from_failure(kind, message))
        }
    }
}

/// Parse a request body; an empty body is an empty object.
fn parse_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(format!("Malformed JSON body: {e}")))
}

/// Catch-all for panics escaping a route.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(panic.as_ref());
    error!(error = %detail, "Unhandled panic in HTTP handler");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "InternalError", "detail": detail })),
    )
        .into_response()
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_empty_body() {
        assert_eq!(parse_payload(b"").unwrap(), json!({}));
        assert_eq!(parse_payload(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_parse_payload_malformed() {
        let err = parse_payload(b"{\"to\":").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_failure_mapping() {
        let cases = [
            (ErrorKind::UnknownTool, StatusCode::NOT_FOUND),
            (ErrorKind::InvalidInput, StatusCode::BAD_REQUEST),
            (ErrorKind::HandlerFault, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorKind::Timeout, StatusCode::GATEWAY_TIMEOUT),
        ];
        for (kind, status) in cases {
            let err = ApiError::from_failure(kind, "x".to_string());
            assert_eq!(err.status(), status);
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_not_found_detail() {
        assert_eq!(ApiError::ToolNotFound.to_string(), "Tool not found");
    }

    #[tokio::test]
    async fn test_escaping_panic_is_internal_error() {
        use axum::body::Body;
        use http::Request;
        use tower::ServiceExt;

        let app = Router::new()
            .route(
                "/boom",
                get(|| async {
                    let mailboxes: Vec<&str> = Vec::new();
                    if mailboxes.is_empty() {
                        panic!("mailbox index corrupted");
                    }
                    "unreachable"
                }),
            )
            .layer(CatchPanicLayer::custom(handle_panic));

        let req = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "error": "InternalError", "detail": "mailbox index corrupted" })
        );
        let detail = body["detail"].as_str().unwrap();
        assert!(!detail.contains("backtrace"));
        assert!(!detail.contains(".rs:"));
    }
}
