use crate::error::{ApiError, ErrorResponse};
use crate::handlers::require_method;
use crate::models::{GetItemsResponse, Item};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::Method, http::StatusCode, Json};

/// GET /items handler - List every item
///
/// Items come back in the order the store yields them.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items", body = Vec<Item>),
        (status = 404, description = "Item table not found", body = ErrorResponse),
        (status = 405, description = "Method other than GET", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items_handler(
    State(state): State<AppState>,
    method: Method,
) -> Result<(StatusCode, Json<GetItemsResponse>), ApiError> {
    get_items(state, method, None).await
}

/// GET /items/:id handler - Fetch one item
///
/// Returns the item, or `null` when no item has the id (still 200; only a
/// missing table is a 404).
#[utoipa::path(
    get,
    path = routes::ITEMS_ITEM,
    params(
        ("id" = String, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "The item, or null when absent", body = Item),
        (status = 404, description = "Item table not found", body = ErrorResponse),
        (status = 405, description = "Method other than GET", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item_handler(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<GetItemsResponse>), ApiError> {
    get_items(state, method, Some(id)).await
}

/// Read one item when an id is given, otherwise every item.
pub(crate) async fn get_items(
    state: AppState,
    method: Method,
    id: Option<String>,
) -> Result<(StatusCode, Json<GetItemsResponse>), ApiError> {
    match &id {
        Some(id) => tracing::info!("Received {} request for item id: {}", method, id),
        None => tracing::info!("Received {} request for all items", method),
    }
    require_method(method, "GET")?;

    let response = match id {
        Some(id) => {
            let item = state.store.get(&id).await?;
            match &item {
                Some(_) => tracing::info!("Successfully retrieved item with id: {}", id),
                None => tracing::info!("No item with id: {}", id),
            }
            GetItemsResponse::One(item)
        }
        None => {
            let items = state.store.scan().await?;
            tracing::info!("Listed {} items", items.len());
            GetItemsResponse::All(items)
        }
    };

    Ok((StatusCode::OK, Json(response)))
}
