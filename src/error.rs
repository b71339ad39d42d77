//! Error Handling Module
//!
//! Error taxonomy for the GraphQL execution adapter:
//! - decode-time failures (`MalformedRequest`)
//! - validation-time failures (`InvalidRequest`)
//! - engine-time failures (`ExecutionFailure`)
//! - interceptor, encoding, configuration and cancellation failures
//!
//! Client errors are recovered locally into deterministic 400 responses.
//! Everything else is surfaced as a server error without retry. Errors the
//! engine reports inside a successful result are not adapter errors at all;
//! they travel in the `errors` array of a 200 response.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphql_web::error::{ErrorCategory, GraphQlWebError};
//!
//! let error = GraphQlWebError::InvalidRequest("query is required".into());
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert_eq!(error.status_code(), 400);
//! ```

use thiserror::Error;

use crate::engine::EngineError;

/// Coarse classification used for status mapping and log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request itself is at fault; the engine was never invoked.
    Client,
    /// The adapter or the engine failed while handling a valid request.
    Server,
    /// The request was abandoned before a response was produced.
    Cancelled,
}

/// Errors produced by the adapter while handling a single request.
#[derive(Debug, Error)]
pub enum GraphQlWebError {
    /// Body could not be decoded into a request shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Body decoded but failed validation (e.g. missing query).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The engine failed to produce a result.
    #[error("Execution failed: {0}")]
    ExecutionFailure(#[from] EngineError),

    /// An interceptor aborted the request.
    #[error("Interceptor '{name}' failed: {message}")]
    Interceptor { name: String, message: String },

    /// The result could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid handler or telemetry configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request was cancelled before completion.
    #[error("Request cancelled")]
    Cancelled,
}

impl GraphQlWebError {
    /// Convenience constructor for interceptor failures.
    pub fn interceptor(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Interceptor {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedRequest(_) | Self::InvalidRequest(_) => ErrorCategory::Client,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::ExecutionFailure(_)
            | Self::Interceptor { .. }
            | Self::Serialization(_)
            | Self::Configuration(_) => ErrorCategory::Server,
        }
    }

    /// HTTP status code for this error.
    ///
    /// Cancellation maps to 499 (client closed request); in practice no
    /// response is written for it.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Client => 400,
            ErrorCategory::Server => 500,
            ErrorCategory::Cancelled => 499,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Client
    }

    /// Message suitable for a response body. Never includes error sources.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedRequest(msg) => format!("Malformed GraphQL request: {msg}"),
            Self::InvalidRequest(msg) => format!("Invalid GraphQL request: {msg}"),
            Self::ExecutionFailure(e) => format!("GraphQL execution failed: {}", e.message()),
            Self::Interceptor { message, .. } => message.clone(),
            Self::Serialization(_) => "Failed to serialize GraphQL response".to_string(),
            Self::Configuration(msg) => format!("Configuration error: {msg}"),
            Self::Cancelled => "Request cancelled".to_string(),
        }
    }
}

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, GraphQlWebError>;
