//! Execution input handed to the engine.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{JsonMap, RequestInput};
use crate::error::GraphQlWebError;

/// Immutable snapshot of one operation to execute.
///
/// Fields are read through accessors; transformations consume the value and
/// return a new one, so an input handed to the engine cannot be changed from
/// elsewhere.
///
/// Equality compares the operation (query, operation name, variables,
/// extensions and context). The execution id only correlates logs and is
/// not part of it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInput {
    query: String,
    operation_name: Option<String>,
    variables: JsonMap,
    extensions: JsonMap,
    context: JsonMap,
    execution_id: Uuid,
}

impl ExecutionInput {
    pub fn builder(query: impl Into<String>) -> ExecutionInputBuilder {
        ExecutionInputBuilder::new(query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    pub fn variables(&self) -> &JsonMap {
        &self.variables
    }

    pub fn extensions(&self) -> &JsonMap {
        &self.extensions
    }

    /// Per-request values contributed by interceptors (e.g. from headers).
    pub fn context(&self) -> &JsonMap {
        &self.context
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    /// Return a copy with `key` set in the context.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_variables(mut self, variables: JsonMap) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_operation_name(mut self, name: Option<String>) -> Self {
        self.operation_name = name;
        self
    }

    pub fn with_execution_id(mut self, id: Uuid) -> Self {
        self.execution_id = id;
        self
    }

    /// Copy of this input with a builder to change several fields at once.
    pub fn transform(self) -> ExecutionInputBuilder {
        ExecutionInputBuilder { inner: self }
    }
}

impl PartialEq for ExecutionInput {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
            && self.operation_name == other.operation_name
            && self.variables == other.variables
            && self.extensions == other.extensions
            && self.context == other.context
    }
}

impl TryFrom<RequestInput> for ExecutionInput {
    type Error = GraphQlWebError;

    /// Validate the request and build its execution input.
    ///
    /// An empty `operationName` is treated as absent.
    fn try_from(request: RequestInput) -> Result<Self, Self::Error> {
        request.validate()?;
        let RequestInput {
            query,
            operation_name,
            variables,
            extensions,
        } = request;
        let query = query.ok_or_else(|| {
            GraphQlWebError::InvalidRequest("'query' is required".to_string())
        })?;
        Ok(ExecutionInput::builder(query)
            .operation_name(operation_name.filter(|name| !name.is_empty()))
            .variables(variables)
            .extensions(extensions)
            .build())
    }
}

/// Builder for [`ExecutionInput`].
#[derive(Debug, Clone)]
pub struct ExecutionInputBuilder {
    inner: ExecutionInput,
}

impl ExecutionInputBuilder {
    fn new(query: impl Into<String>) -> Self {
        Self {
            inner: ExecutionInput {
                query: query.into(),
                operation_name: None,
                variables: JsonMap::new(),
                extensions: JsonMap::new(),
                context: JsonMap::new(),
                execution_id: Uuid::new_v4(),
            },
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.inner.query = query.into();
        self
    }

    pub fn operation_name(mut self, name: Option<String>) -> Self {
        self.inner.operation_name = name;
        self
    }

    pub fn variables(mut self, variables: JsonMap) -> Self {
        self.inner.variables = variables;
        self
    }

    pub fn extensions(mut self, extensions: JsonMap) -> Self {
        self.inner.extensions = extensions;
        self
    }

    pub fn context(mut self, context: JsonMap) -> Self {
        self.inner.context = context;
        self
    }

    pub fn execution_id(mut self, id: Uuid) -> Self {
        self.inner.execution_id = id;
        self
    }

    pub fn build(self) -> ExecutionInput {
        self.inner
    }
}
