//! Engine outcome and its GraphQL response representation.
//!
//! See <https://spec.graphql.org/October2021/#sec-Response>.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::JsonMap;

/// A source location (line and column numbers) for a [`GraphQlError`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

/// One step of a response path: a field name or a list index.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A serializable error, as found in a GraphQL response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    #[serde(default)]
    pub extensions: Option<JsonMap>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The error's response map: `message`, then `locations`, `path` and
    /// `extensions` when set.
    pub fn to_specification(&self) -> JsonMap {
        let mut out = JsonMap::new();
        out.insert("message".to_string(), Value::String(self.message.clone()));
        if !self.locations.is_empty() {
            let locations = self
                .locations
                .iter()
                .map(|l| serde_json::json!({ "line": l.line, "column": l.column }))
                .collect();
            out.insert("locations".to_string(), Value::Array(locations));
        }
        if !self.path.is_empty() {
            let path = self
                .path
                .iter()
                .map(|segment| match segment {
                    PathSegment::Key(key) => Value::String(key.clone()),
                    PathSegment::Index(index) => Value::from(*index),
                })
                .collect();
            out.insert("path".to_string(), Value::Array(path));
        }
        if let Some(ext) = &self.extensions {
            out.insert("extensions".to_string(), Value::Object(ext.clone()));
        }
        out
    }
}

impl Serialize for GraphQlError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_specification().serialize(serializer)
    }
}

/// Outcome of one execution.
///
/// `data` distinguishes "not executed" (`None`, key omitted) from "executed
/// with a null result" (`Some(Value::Null)`, serialized as `"data": null`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecutionResult {
    #[serde(default, deserialize_with = "present_value")]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
    #[serde(default)]
    extensions: Option<JsonMap>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ExecutionResult {
    /// Result of an execution that produced `data` (which may be `null`).
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Result of a request that failed before execution; carries no `data` key.
    pub fn errors_only(errors: Vec<GraphQlError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: None,
        }
    }

    pub fn with_error(mut self, error: GraphQlError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = GraphQlError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn is_data_present(&self) -> bool {
        self.data.is_some()
    }

    pub fn errors(&self) -> &[GraphQlError] {
        &self.errors
    }

    pub fn extensions(&self) -> Option<&JsonMap> {
        self.extensions.as_ref()
    }

    /// The response map defined by the GraphQL specification.
    ///
    /// `errors` is omitted when empty and `extensions` when absent or empty.
    pub fn to_specification(&self) -> JsonMap {
        let mut out = JsonMap::new();
        if let Some(data) = &self.data {
            out.insert("data".to_string(), data.clone());
        }
        if !self.errors.is_empty() {
            let errors = self
                .errors
                .iter()
                .map(|e| Value::Object(e.to_specification()))
                .collect();
            out.insert("errors".to_string(), Value::Array(errors));
        }
        if let Some(ext) = self.extensions.as_ref().filter(|m| !m.is_empty()) {
            out.insert("extensions".to_string(), Value::Object(ext.clone()));
        }
        out
    }
}

impl Serialize for ExecutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_specification().serialize(serializer)
    }
}
