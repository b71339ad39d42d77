//! Request-level interceptors
//!
//! Interceptors wrap the engine call with two hooks: `pre_handle` rewrites
//! the execution input before it is submitted, `post_handle` rewrites the
//! result before it is encoded. Both default to the identity.
//!
//! Pre hooks run in registration order, post hooks in reverse registration
//! order, so the first registered interceptor is the outermost layer.

use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;

use super::named::NamedInterceptor;
use crate::error::{ErrorCategory, GraphQlWebError};
use crate::types::{ExecutionInput, ExecutionResult};

/// Interception hooks around a single execution.
#[async_trait]
pub trait GraphQlInterceptor: Send + Sync {
    /// Rewrite the input before execution (e.g. inject context derived from
    /// headers). Returning an error aborts the request before the engine runs.
    async fn pre_handle(
        &self,
        input: ExecutionInput,
        _headers: &HeaderMap,
    ) -> Result<ExecutionInput, GraphQlWebError> {
        Ok(input)
    }

    /// Rewrite the result after execution. `input` is the snapshot that was
    /// submitted to the engine.
    async fn post_handle(
        &self,
        _input: &ExecutionInput,
        result: ExecutionResult,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        Ok(result)
    }
}

/// Ordered list of named interceptors.
#[derive(Clone, Default, Debug)]
pub struct InterceptorChain {
    entries: Vec<NamedInterceptor>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor (builder style).
    pub fn with(
        mut self,
        name: impl Into<String>,
        interceptor: Arc<dyn GraphQlInterceptor>,
    ) -> Self {
        self.push(name, interceptor);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, interceptor: Arc<dyn GraphQlInterceptor>) {
        self.entries.push(NamedInterceptor::new(name, interceptor));
    }

    /// Remove the interceptor registered under `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Replace the interceptor registered under `name`, keeping its position.
    pub fn replace(&mut self, name: &str, interceptor: Arc<dyn GraphQlInterceptor>) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.interceptor = interceptor;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `pre_handle` across interceptors in registration order.
    pub async fn apply_pre_chain(
        &self,
        mut input: ExecutionInput,
        headers: &HeaderMap,
    ) -> Result<ExecutionInput, GraphQlWebError> {
        for entry in &self.entries {
            input = entry
                .interceptor
                .pre_handle(input, headers)
                .await
                .map_err(|e| attribute(&entry.name, e, false))?;
        }
        Ok(input)
    }

    /// Apply `post_handle` across interceptors in reverse registration order.
    pub async fn apply_post_chain(
        &self,
        input: &ExecutionInput,
        mut result: ExecutionResult,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        for entry in self.entries.iter().rev() {
            result = entry
                .interceptor
                .post_handle(input, result)
                .await
                .map_err(|e| attribute(&entry.name, e, true))?;
        }
        Ok(result)
    }
}

/// Tag a failure with the name of the interceptor that raised it.
///
/// Cancellation passes through. Client errors pass through before execution
/// only; once the engine has run the request is no longer at fault.
fn attribute(name: &str, error: GraphQlWebError, after_execution: bool) -> GraphQlWebError {
    match error.category() {
        ErrorCategory::Cancelled => error,
        ErrorCategory::Client if !after_execution => error,
        _ => match error {
            GraphQlWebError::Interceptor { .. } => error,
            e => GraphQlWebError::interceptor(name, e.to_string()),
        },
    }
}
