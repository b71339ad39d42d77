//! Interceptor middleware
//!
//! Interceptors sit between request validation and the engine call. They
//! operate on the typed execution input and result, never on raw bytes.

pub mod interceptor;
pub mod named;
pub mod presets;

pub use interceptor::{GraphQlInterceptor, InterceptorChain};
pub use named::NamedInterceptor;
pub use presets::{HeaderContextInterceptor, LoggingInterceptor};
