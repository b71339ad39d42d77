//! Axum-specific server adapters
//!
//! ## Features
//!
//! - **Router**: `graphql_router()` mounts `POST /graphql`
//! - **Handler**: `graphql_post()` can be mounted on any route with `State<Arc<GraphQlHandler>>`
//! - **Response**: `GraphQlHttpResponse` implements `IntoResponse`
//!
//! When the client disconnects, axum drops the handler future and with it the
//! in-flight engine future; no partial response is written.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_web::server_adapters::axum::graphql_router;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = graphql_router(Arc::new(handler));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
    routing::post,
};

use super::{GRAPHQL_RESPONSE_CONTENT_TYPE, GraphQlHttpResponse};
use crate::handler::GraphQlHandler;

/// Default mount path.
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

impl IntoResponse for GraphQlHttpResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut resp = Response::new(Body::from(self.into_body()));
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(GRAPHQL_RESPONSE_CONTENT_TYPE),
        );
        resp
    }
}

/// Axum handler: raw body and headers in, encoded GraphQL response out.
pub async fn graphql_post(
    State(handler): State<Arc<GraphQlHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> GraphQlHttpResponse {
    handler.handle(&body, &headers).await
}

/// Router with the handler mounted at [`DEFAULT_GRAPHQL_PATH`].
pub fn graphql_router(handler: Arc<GraphQlHandler>) -> Router {
    graphql_router_at(DEFAULT_GRAPHQL_PATH, handler)
}

/// Router with the handler mounted at `path`.
pub fn graphql_router_at(path: &str, handler: Arc<GraphQlHandler>) -> Router {
    Router::new()
        .route(path, post(graphql_post))
        .with_state(handler)
}
