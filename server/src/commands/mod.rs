//! Commands Layer
//!
//! axum handlers that bridge HTTP clients to the repositories.

mod error;
mod health_cmd;
mod item_cmd;
mod list_cmd;
mod request_tracing;

pub use error::{ApiError, ApiJson, ErrorBody};
pub use health_cmd::*;
pub use item_cmd::*;
pub use list_cmd::*;
pub use request_tracing::request_tracing_middleware;
