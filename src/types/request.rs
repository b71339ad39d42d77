//! Inbound request body.

use serde::{Deserialize, Deserializer, Serialize};

use super::JsonMap;
use crate::error::GraphQlWebError;

/// GraphQL request as sent by the client.
///
/// `query` is optional at the decoding layer so that a body without it is an
/// `InvalidRequest` (validation) rather than a `MalformedRequest` (decoding).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "JsonMap::is_empty"
    )]
    pub variables: JsonMap,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "JsonMap::is_empty"
    )]
    pub extensions: JsonMap,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<JsonMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<JsonMap>::deserialize(deserializer)?.unwrap_or_default())
}

impl RequestInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: JsonMap) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_extensions(mut self, extensions: JsonMap) -> Self {
        self.extensions = extensions;
        self
    }

    /// Check that a non-blank query is present.
    pub fn validate(&self) -> Result<(), GraphQlWebError> {
        match self.query.as_deref() {
            None => Err(GraphQlWebError::InvalidRequest(
                "'query' is required".to_string(),
            )),
            Some(q) if q.trim().is_empty() => Err(GraphQlWebError::InvalidRequest(
                "'query' must not be blank".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}
