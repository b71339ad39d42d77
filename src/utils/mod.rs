//! Utility modules for graphql-web

pub mod cancel;

pub use cancel::{CancelHandle, new_cancel_handle};
