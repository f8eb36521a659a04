//! Tool handler abstraction.
//!
//! A handler receives an input that already passed schema validation and
//! returns either a JSON value or a [`HandlerError`]. Handlers never see
//! raw wire payloads.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use super::error::HandlerError;
use super::validator::ValidatedInput;

/// Result type returned by tool handlers.
pub type HandlerResult = Result<Value, HandlerError>;

/// Trait for implementing tool handlers.
///
/// Implementations must be cheap to share: the registry stores them as
/// `Arc<dyn ToolHandler>` and calls them concurrently.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated input.
    async fn call(&self, input: ValidatedInput) -> HandlerResult;
}

/// Adapter turning an async closure into a [`ToolHandler`].
pub struct FnHandler<F> {
    func: F,
}

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ValidatedInput) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, input: ValidatedInput) -> HandlerResult {
        (self.func)(input).await
    }
}

/// Wrap an async closure as a shareable handler.
pub fn handler_fn<F, Fut>(func: F) -> Arc<dyn ToolHandler>
where
    F: Fn(ValidatedInput) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(FnHandler { func })
}
