//! # graphql-web
//!
//! A single-request GraphQL execution adapter. It sits between a web
//! framework and a GraphQL execution engine:
//!
//! - **Decoding**: raw body bytes into a validated request ([`codec`], [`types`])
//! - **Interception**: ordered pre/post execution hooks ([`middleware`])
//! - **Execution**: a shared, read-only engine handle ([`engine`])
//! - **Encoding**: spec-compliant JSON responses with the right status ([`server_adapters`])
//!
//! ## Features
//!
//! - `server-adapters` - Enable the Axum router and `IntoResponse` integration
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_web::prelude::*;
//!
//! let engine: EngineHandle = Arc::new(engine_fn(|_input| async {
//!     Ok(ExecutionResult::new(serde_json::json!({ "hello": "world" })))
//! }));
//! let handler = GraphQlHandler::builder(engine)
//!     .interceptor("logging", Arc::new(LoggingInterceptor))
//!     .build();
//!
//! let response = handler
//!     .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
//!     .await;
//! assert_eq!(response.body().as_ref(), br#"{"data":{"hello":"world"}}"#);
//! ```

#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod server_adapters;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::{ErrorCategory, GraphQlWebError};
pub use handler::{GraphQlHandler, GraphQlHandlerBuilder};

/// Commonly used types
pub mod prelude {
    pub use crate::config::HandlerConfig;
    pub use crate::engine::{EngineError, EngineHandle, ExecutionEngine, engine_fn};
    pub use crate::error::{ErrorCategory, GraphQlWebError};
    pub use crate::handler::GraphQlHandler;
    pub use crate::middleware::{
        GraphQlInterceptor, HeaderContextInterceptor, InterceptorChain, LoggingInterceptor,
    };
    pub use crate::server_adapters::GraphQlHttpResponse;
    pub use crate::types::{
        ExecutionInput, ExecutionResult, GraphQlError, Location, PathSegment, RequestInput,
    };
    pub use crate::utils::cancel::CancelHandle;
    pub use http::{HeaderMap, StatusCode};
}
