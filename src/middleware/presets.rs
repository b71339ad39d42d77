//! Ready-made interceptors.

use async_trait::async_trait;
use http::HeaderMap;
use serde_json::Value;

use super::interceptor::GraphQlInterceptor;
use crate::error::GraphQlWebError;
use crate::types::{ExecutionInput, ExecutionResult, JsonMap};

/// A simple logging interceptor backed by `tracing` (no query text or variables).
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl GraphQlInterceptor for LoggingInterceptor {
    async fn pre_handle(
        &self,
        input: ExecutionInput,
        _headers: &HeaderMap,
    ) -> Result<ExecutionInput, GraphQlWebError> {
        tracing::debug!(
            target: "graphql_web::interceptor",
            execution_id = %input.execution_id(),
            operation = input.operation_name().unwrap_or("<anonymous>"),
            variables = input.variables().len(),
            "executing graphql operation"
        );
        Ok(input)
    }

    async fn post_handle(
        &self,
        input: &ExecutionInput,
        result: ExecutionResult,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        tracing::debug!(
            target: "graphql_web::interceptor",
            execution_id = %input.execution_id(),
            operation = input.operation_name().unwrap_or("<anonymous>"),
            data_present = result.is_data_present(),
            errors = result.errors().len(),
            "graphql operation finished"
        );
        Ok(result)
    }
}

/// Copies an allow-list of request headers into the execution context.
///
/// Keys are stored lowercased under a `headers` object in the context.
/// Headers with non-UTF-8 values are skipped; repeated headers keep the first value.
#[derive(Clone, Debug)]
pub struct HeaderContextInterceptor {
    allowed: Vec<String>,
    context_key: String,
}

impl HeaderContextInterceptor {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|h| h.as_ref().to_ascii_lowercase())
                .collect(),
            context_key: "headers".to_string(),
        }
    }

    /// Store headers under a different context key.
    pub fn with_context_key(mut self, key: impl Into<String>) -> Self {
        self.context_key = key.into();
        self
    }

    fn collect(&self, headers: &HeaderMap) -> JsonMap {
        let mut out = JsonMap::new();
        for name in &self.allowed {
            let value = headers.get(name.as_str()).and_then(|v| v.to_str().ok());
            if let Some(value) = value {
                out.insert(name.clone(), Value::String(value.to_string()));
            }
        }
        out
    }
}

#[async_trait]
impl GraphQlInterceptor for HeaderContextInterceptor {
    async fn pre_handle(
        &self,
        input: ExecutionInput,
        headers: &HeaderMap,
    ) -> Result<ExecutionInput, GraphQlWebError> {
        let collected = self.collect(headers);
        if collected.is_empty() {
            return Ok(input);
        }
        Ok(input.with_context(self.context_key.clone(), Value::Object(collected)))
    }
}
