//! GraphQL execution adapter
//!
//! [`GraphQlHandler`] orchestrates one request:
//!
//! 1. decode the body into a [`RequestInput`]
//! 2. validate it and build an [`ExecutionInput`]
//! 3. run interceptor `pre_handle` hooks (registration order)
//! 4. execute on the shared engine
//! 5. run interceptor `post_handle` hooks (reverse order)
//! 6. encode the result as a 200 response
//!
//! Client errors in steps 1-2 become 400 responses without touching the
//! engine; engine and interceptor failures become 500 responses. Errors the
//! engine reports inside its result are part of a normal 200 body.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_web::prelude::*;
//!
//! let handler = GraphQlHandler::builder(engine)
//!     .interceptor("logging", Arc::new(LoggingInterceptor))
//!     .config(HandlerConfig::from_env()?)
//!     .build();
//!
//! let response = handler.handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new()).await;
//! assert_eq!(response.status(), StatusCode::OK);
//! ```

use std::sync::Arc;

use http::HeaderMap;
use tracing::Instrument;

use crate::codec::decode_request;
use crate::config::HandlerConfig;
use crate::engine::EngineHandle;
use crate::error::{ErrorCategory, GraphQlWebError};
use crate::middleware::{GraphQlInterceptor, InterceptorChain};
use crate::server_adapters::GraphQlHttpResponse;
use crate::types::{ExecutionInput, ExecutionResult, RequestInput};
use crate::utils::cancel::CancelHandle;

/// Adapter between a web framework and a GraphQL execution engine.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
#[derive(Clone)]
pub struct GraphQlHandler {
    engine: EngineHandle,
    interceptors: InterceptorChain,
    config: HandlerConfig,
}

impl std::fmt::Debug for GraphQlHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlHandler")
            .field("engine", &"<dyn ExecutionEngine>")
            .field("interceptors", &self.interceptors.names())
            .field("config", &self.config)
            .finish()
    }
}

impl GraphQlHandler {
    /// Handler with no interceptors and the default configuration.
    pub fn new(engine: EngineHandle) -> Self {
        Self::builder(engine).build()
    }

    pub fn builder(engine: EngineHandle) -> GraphQlHandlerBuilder {
        GraphQlHandlerBuilder::new(engine)
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handle a raw request body and produce the encoded response.
    ///
    /// Dropping the returned future before it completes drops the in-flight
    /// engine future as well.
    pub async fn handle(&self, body: &[u8], headers: &HeaderMap) -> GraphQlHttpResponse {
        let outcome = self.process(body, headers).await;
        if let Err(e) = &outcome {
            log_failure(e);
        }
        GraphQlHttpResponse::from_outcome(&outcome, &self.config)
    }

    /// Like [`handle`](Self::handle), but stops as soon as `cancel` fires.
    ///
    /// On cancellation the engine future is dropped and `Cancelled` is
    /// returned; no response is produced.
    pub async fn handle_with_cancel(
        &self,
        body: &[u8],
        headers: &HeaderMap,
        cancel: &CancelHandle,
    ) -> Result<GraphQlHttpResponse, GraphQlWebError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(target: "graphql_web::handler", "request cancelled");
                Err(GraphQlWebError::Cancelled)
            }
            response = self.handle(body, headers) => Ok(response),
        }
    }

    /// Decode and execute, without encoding.
    pub async fn process(
        &self,
        body: &[u8],
        headers: &HeaderMap,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        let request = decode_request(body)?;
        self.execute_request(request, headers).await
    }

    /// Validate, intercept and execute an already decoded request.
    pub async fn execute_request(
        &self,
        request: RequestInput,
        headers: &HeaderMap,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        let input = ExecutionInput::try_from(request)?;
        let span = tracing::debug_span!(
            target: "graphql_web::handler",
            "graphql_request",
            execution_id = %input.execution_id(),
            operation = input.operation_name().unwrap_or("<anonymous>"),
        );
        self.execute_input(input, headers).instrument(span).await
    }

    async fn execute_input(
        &self,
        input: ExecutionInput,
        headers: &HeaderMap,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        let input = self.interceptors.apply_pre_chain(input, headers).await?;
        let submitted = input.clone();
        let result = self.engine.execute(input).await?;
        tracing::trace!(
            target: "graphql_web::handler",
            errors = result.errors().len(),
            "engine returned"
        );
        self.interceptors.apply_post_chain(&submitted, result).await
    }
}

fn log_failure(error: &GraphQlWebError) {
    match error.category() {
        ErrorCategory::Client => {
            tracing::warn!(target: "graphql_web::handler", error = %error, "rejected graphql request")
        }
        ErrorCategory::Server => {
            tracing::error!(target: "graphql_web::handler", error = %error, "graphql request failed")
        }
        ErrorCategory::Cancelled => {
            tracing::debug!(target: "graphql_web::handler", "graphql request cancelled")
        }
    }
}

/// Builder for [`GraphQlHandler`].
pub struct GraphQlHandlerBuilder {
    engine: EngineHandle,
    interceptors: InterceptorChain,
    config: HandlerConfig,
}

impl GraphQlHandlerBuilder {
    fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            interceptors: InterceptorChain::new(),
            config: HandlerConfig::default(),
        }
    }

    /// Register an interceptor. Registration order is pre-execution order.
    pub fn interceptor(
        mut self,
        name: impl Into<String>,
        interceptor: Arc<dyn GraphQlInterceptor>,
    ) -> Self {
        self.interceptors.push(name, interceptor);
        self
    }

    pub fn interceptors(mut self, chain: InterceptorChain) -> Self {
        self.interceptors = chain;
        self
    }

    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> GraphQlHandler {
        GraphQlHandler {
            engine: self.engine,
            interceptors: self.interceptors,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, engine_fn};
    use crate::middleware::LoggingInterceptor;
    use http::StatusCode;
    use serde_json::json;

    fn hello_engine() -> EngineHandle {
        Arc::new(engine_fn(|_input: ExecutionInput| async {
            Ok(ExecutionResult::new(json!({ "hello": "world" })))
        }))
    }

    #[tokio::test]
    async fn hello_world_round_trip() {
        let handler = GraphQlHandler::new(hello_engine());
        let resp = handler
            .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(&resp.body()[..], br#"{"data":{"hello":"world"}}"#);
    }

    #[tokio::test]
    async fn engine_failure_is_server_error() {
        let engine: EngineHandle = Arc::new(engine_fn(|_input: ExecutionInput| async {
            Err(EngineError::new("executor shut down"))
        }));
        let handler = GraphQlHandler::builder(engine)
            .config(HandlerConfig::development())
            .build();
        let outcome = handler
            .process(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
            .await;
        assert!(matches!(outcome, Err(GraphQlWebError::ExecutionFailure(_))));
    }

    #[test]
    fn cancel_wakes_and_resolves_pending_request() {
        let engine: EngineHandle = Arc::new(engine_fn(|_input: ExecutionInput| {
            std::future::pending::<Result<ExecutionResult, EngineError>>()
        }));
        let handler = GraphQlHandler::new(engine);
        let headers = HeaderMap::new();
        let cancel = CancelHandle::new();

        let mut task = tokio_test::task::spawn(handler.handle_with_cancel(
            br#"{"query":"{ hello }"}"#,
            &headers,
            &cancel,
        ));
        tokio_test::assert_pending!(task.poll());

        cancel.cancel();
        assert!(task.is_woken());
        let outcome = tokio_test::assert_ready!(task.poll());
        assert!(matches!(outcome, Err(GraphQlWebError::Cancelled)));
    }

    #[test]
    fn builder_registers_interceptors_in_order() {
        let handler = GraphQlHandler::builder(hello_engine())
            .interceptor("first", Arc::new(LoggingInterceptor))
            .interceptor("second", Arc::new(LoggingInterceptor))
            .build();
        assert_eq!(handler.interceptors().names(), vec!["first", "second"]);
        assert!(format!("{handler:?}").contains("first"));
    }
}
