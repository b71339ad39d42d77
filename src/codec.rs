//! Request decoding and response encoding
//!
//! Decoding turns raw body bytes into a [`RequestInput`]; encoding turns an
//! [`ExecutionResult`] (or an adapter error) into response bytes. Both are
//! pure functions so identical inputs always produce identical bytes.

use bytes::Bytes;
use serde_json::Value;

use crate::config::HandlerConfig;
use crate::error::{ErrorCategory, GraphQlWebError};
use crate::types::{ExecutionResult, GraphQlError, RequestInput};

/// Options for JSON encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncodeOptions {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
}

impl From<&HandlerConfig> for JsonEncodeOptions {
    fn from(config: &HandlerConfig) -> Self {
        Self {
            pretty: config.pretty_json,
        }
    }
}

/// Decode a request body.
///
/// The body must be a JSON object; anything else, including an empty body,
/// is a `MalformedRequest`.
pub fn decode_request(body: &[u8]) -> Result<RequestInput, GraphQlWebError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GraphQlWebError::MalformedRequest(
            "request body is empty".to_string(),
        ));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| GraphQlWebError::MalformedRequest(e.to_string()))?;
    if !value.is_object() {
        return Err(GraphQlWebError::MalformedRequest(
            "request body must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| GraphQlWebError::MalformedRequest(e.to_string()))
}

/// Encode a result in its GraphQL response form (see
/// [`ExecutionResult::to_specification`]). Object keys keep the engine's order.
pub fn encode_result(
    result: &ExecutionResult,
    opts: JsonEncodeOptions,
) -> Result<Bytes, GraphQlWebError> {
    let response = Value::Object(result.to_specification());
    let encoded = if opts.pretty {
        serde_json::to_vec_pretty(&response)
    } else {
        serde_json::to_vec(&response)
    };
    encoded
        .map(Bytes::from)
        .map_err(|e| GraphQlWebError::Serialization(e.to_string()))
}

/// Encode an adapter error as an errors-only GraphQL body (no `data` key).
///
/// Server-side messages are replaced by the configured masked message when
/// masking is enabled; client errors always carry their message.
pub fn encode_error_body(error: &GraphQlWebError, config: &HandlerConfig) -> Bytes {
    let message = match error.category() {
        ErrorCategory::Server if config.mask_errors => config.masked_message().to_string(),
        _ => error.user_message(),
    };
    let result = ExecutionResult::errors_only(vec![GraphQlError::new(message)]);
    encode_result(&result, JsonEncodeOptions::from(config))
        .unwrap_or_else(|_| Bytes::from_static(br#"{"errors":[{"message":"internal error"}]}"#))
}
