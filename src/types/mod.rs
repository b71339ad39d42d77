//! Request-scoped data types
//!
//! - [`RequestInput`]: the decoded transport body
//! - [`ExecutionInput`]: the immutable snapshot handed to the engine
//! - [`ExecutionResult`]: the engine outcome and its wire representation

mod execution;
mod request;
mod result;

pub use execution::{ExecutionInput, ExecutionInputBuilder};
pub use request::RequestInput;
pub use result::{ExecutionResult, GraphQlError, Location, PathSegment};

/// JSON object type used for variables, extensions and context.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
