//! Named interceptor entries.

use std::sync::Arc;

use super::interceptor::GraphQlInterceptor;

/// Interceptor paired with a name so it can be queried, removed or replaced.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use graphql_web::middleware::{LoggingInterceptor, NamedInterceptor};
///
/// let named = NamedInterceptor::new("logging", Arc::new(LoggingInterceptor));
/// ```
#[derive(Clone)]
pub struct NamedInterceptor {
    pub name: String,
    pub interceptor: Arc<dyn GraphQlInterceptor>,
}

impl NamedInterceptor {
    pub fn new(name: impl Into<String>, interceptor: Arc<dyn GraphQlInterceptor>) -> Self {
        Self {
            name: name.into(),
            interceptor,
        }
    }
}

impl std::fmt::Debug for NamedInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedInterceptor")
            .field("name", &self.name)
            .field("interceptor", &"<dyn GraphQlInterceptor>")
            .finish()
    }
}
