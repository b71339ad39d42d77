//! Server adapters: convert handler outcomes into transport responses
//!
//! This module provides a framework-agnostic response type plus
//! framework-specific integrations.
//!
//! ## Features
//!
//! - **Framework-agnostic**: [`GraphQlHttpResponse`] carries status, content type and body
//! - **Axum integration**: `axum::graphql_router()` (requires `server-adapters` feature)
//! - **Error masking**: server-error messages are replaced per [`HandlerConfig`]
//!
//! ## Example (Axum)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_web::handler::GraphQlHandler;
//! use graphql_web::server_adapters::axum::graphql_router;
//!
//! let handler = Arc::new(GraphQlHandler::new(engine));
//! let app = graphql_router(handler);
//! ```

use bytes::Bytes;
use http::StatusCode;

use crate::codec::{JsonEncodeOptions, encode_error_body, encode_result};
use crate::config::HandlerConfig;
use crate::error::GraphQlWebError;
use crate::types::ExecutionResult;

#[cfg(feature = "server-adapters")]
pub mod axum;

/// Content type of every response body produced here.
pub const GRAPHQL_RESPONSE_CONTENT_TYPE: &str = "application/json";

/// A fully encoded response, ready to hand to any web framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlHttpResponse {
    status: StatusCode,
    body: Bytes,
}

impl GraphQlHttpResponse {
    /// Encode an execution result with status 200, whether or not it carries errors.
    pub fn from_result(result: &ExecutionResult, config: &HandlerConfig) -> Self {
        match encode_result(result, JsonEncodeOptions::from(config)) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body,
            },
            Err(e) => Self::from_error(&e, config),
        }
    }

    /// Encode an adapter error with the status implied by its category.
    pub fn from_error(error: &GraphQlWebError, config: &HandlerConfig) -> Self {
        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            body: encode_error_body(error, config),
        }
    }

    pub fn from_outcome(
        outcome: &Result<ExecutionResult, GraphQlWebError>,
        config: &HandlerConfig,
    ) -> Self {
        match outcome {
            Ok(result) => Self::from_result(result, config),
            Err(e) => Self::from_error(e, config),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> &'static str {
        GRAPHQL_RESPONSE_CONTENT_TYPE
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Parse the body back into JSON (useful for tests and logging).
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Convert into an `http::Response` for frameworks built on the `http` crate.
    pub fn into_http_response(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(GRAPHQL_RESPONSE_CONTENT_TYPE),
        );
        response
    }
}
