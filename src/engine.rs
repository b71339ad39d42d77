//! Execution engine collaborator
//!
//! The engine parses, validates and resolves a query against a schema. It is a
//! black box here: the adapter hands it an [`ExecutionInput`], awaits the
//! [`ExecutionResult`], and never inspects a failure beyond its message.
//!
//! The handle is built once at startup and shared read-only across requests:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_web::engine::{EngineHandle, engine_fn};
//! use graphql_web::types::ExecutionResult;
//!
//! let engine: EngineHandle = Arc::new(engine_fn(|_input| async {
//!     Ok(ExecutionResult::new(serde_json::json!({ "hello": "world" })))
//! }));
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ExecutionInput, ExecutionResult};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of the engine's asynchronous execution.
///
/// Semantic errors (unknown field, resolver error) belong in
/// [`ExecutionResult::errors`]; this type is for executions that produced no
/// result at all.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable via `source()`.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A GraphQL execution service.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Execute one operation. Cancellation is by dropping the returned future.
    async fn execute(&self, input: ExecutionInput) -> Result<ExecutionResult, EngineError>;
}

/// Shared, immutable engine handle.
pub type EngineHandle = Arc<dyn ExecutionEngine>;

/// Engine backed by an async closure.
pub struct FnEngine<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEngine").finish_non_exhaustive()
    }
}

/// Adapt an async closure into an [`ExecutionEngine`].
pub fn engine_fn<F, Fut>(f: F) -> FnEngine<F>
where
    F: Fn(ExecutionInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ExecutionResult, EngineError>> + Send,
{
    FnEngine { f }
}

#[async_trait]
impl<F, Fut> ExecutionEngine for FnEngine<F>
where
    F: Fn(ExecutionInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ExecutionResult, EngineError>> + Send,
{
    async fn execute(&self, input: ExecutionInput) -> Result<ExecutionResult, EngineError> {
        (self.f)(input).await
    }
}
