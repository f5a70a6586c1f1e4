pub mod health;
pub mod create;
pub mod get;
pub mod update;
pub mod delete;

pub use health::health_handler;
pub use create::create_item_handler;
pub use get::{get_item_handler, list_items_handler};
pub use update::update_item_handler;
pub use delete::delete_item_handler;

use crate::error::ApiError;
use axum::http::Method;

/// Reject a request whose method is not the one a handler serves.
///
/// The router already dispatches by method; the check keeps each handler
/// correct when mounted on its own.
pub(crate) fn require_method(method: Method, expected: &'static str) -> Result<(), ApiError> {
    if method.as_str() == expected {
        Ok(())
    } else {
        tracing::warn!("Rejected {} request, handler only accepts {}", method, expected);
        Err(ApiError::MethodNotAllowed {
            expected,
            actual: method,
        })
    }
}
