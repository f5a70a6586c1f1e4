use crate::error::{ApiError, ErrorResponse};
use crate::handlers::require_method;
use crate::models::DeleteResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::Method, http::StatusCode, Json};

/// DELETE /items/:id handler - Remove an item
///
/// Deleting an id that does not exist still answers 200 `{}`.
#[utoipa::path(
    delete,
    path = routes::ITEMS_ITEM,
    params(
        ("id" = String, Path, description = "Id of the item to delete")
    ),
    responses(
        (status = 200, description = "Item deleted (or never existed)", body = DeleteResponse),
        (status = 404, description = "Item table not found", body = ErrorResponse),
        (status = 405, description = "Method other than DELETE", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item_handler(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    tracing::info!("Received {} request to delete item with id: {}", method, id);
    require_method(method, "DELETE")?;

    state.store.delete(&id).await?;

    tracing::info!("Successfully deleted item with id: {}", id);
    Ok((StatusCode::OK, Json(DeleteResponse {})))
}
