use crate::error::{ApiError, ErrorResponse};
use crate::handlers::require_method;
use crate::models::{Item, ItemBody};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::Path, extract::State, http::Method, http::StatusCode, Json};

/// PUT /items/:id handler - Overwrite an item's name
///
/// The item is not looked up first: an unknown id is created with the given
/// name.
#[utoipa::path(
    put,
    path = routes::ITEMS_ITEM,
    params(
        ("id" = String, Path, description = "Id of the item to update")
    ),
    request_body = ItemBody,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Invalid JSON body", body = ErrorResponse),
        (status = 404, description = "Item table not found", body = ErrorResponse),
        (status = 405, description = "Method other than PUT", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item_handler(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    tracing::info!("Received {} request to update item with id: {}", method, id);
    require_method(method, "PUT")?;

    let ItemBody { name } = serde_json::from_slice::<ItemBody>(&body)?;

    let item = state.store.update(&id, &name).await?;

    tracing::info!("Successfully updated item with id: {}", item.id);
    Ok((StatusCode::OK, Json(item)))
}
