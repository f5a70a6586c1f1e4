use crate::error::{ApiError, ErrorResponse};
use crate::handlers::require_method;
use crate::models::{Item, ItemBody};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::Method, http::StatusCode, Json};

/// POST /items handler - Create an item with a server-generated id
///
/// Responds with the stored item, `{id, name}`.
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = ItemBody,
    responses(
        (status = 200, description = "Item created", body = Item),
        (status = 400, description = "Invalid JSON body", body = ErrorResponse),
        (status = 404, description = "Item table not found", body = ErrorResponse),
        (status = 405, description = "Method other than POST", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    tracing::info!("Received {} request to create an item", method);
    require_method(method, "POST")?;

    let ItemBody { name } = serde_json::from_slice::<ItemBody>(&body)?;
    let item = Item::with_new_id(name);

    state.store.put(&item).await?;

    tracing::info!("Successfully created item with id: {}", item.id);
    Ok((StatusCode::OK, Json(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemStore, MemoryStore};
    use crate::testing::{
        body_json, failing_app, json_request, memory_app, test_state, Failure,
    };
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let (app, store) = memory_app();

        let response = app
            .oneshot(json_request("POST", "/items", r#"{"name":"widget"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "widget");
        let id = body["id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "widget");
    }

    #[tokio::test]
    async fn test_create_endpoint_mints_distinct_ids() {
        let (app, store) = memory_app();

        let first = body_json(
            app.clone()
                .oneshot(json_request("POST", "/items", r#"{"name":"same"}"#))
                .await
                .unwrap(),
        )
        .await;
        let second = body_json(
            app.oneshot(json_request("POST", "/items", r#"{"name":"same"}"#))
                .await
                .unwrap(),
        )
        .await;

        assert_ne!(first["id"], second["id"]);
        assert_eq!(store.scan().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let (app, store) = memory_app();

        let response = app
            .oneshot(json_request("POST", "/items", "{invalid json}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("JSON parse error"));
        assert!(store.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_name() {
        let (app, _) = memory_app();

        let response = app
            .oneshot(json_request("POST", "/items", r#"{"title":"widget"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_endpoint_table_not_found() {
        let response = failing_app(Failure::TableNotFound)
            .oneshot(json_request("POST", "/items", r#"{"name":"widget"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], crate::error::TABLE_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_endpoint_store_failure() {
        let response = failing_app(Failure::Other)
            .oneshot(json_request("POST", "/items", r#"{"name":"widget"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], crate::error::UNKNOWN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_handler_rejects_wrong_method() {
        let store = MemoryStore::new();
        let state = test_state(Arc::new(store.clone()));

        let result = create_item_handler(
            State(state),
            Method::PUT,
            Bytes::from_static(br#"{"name":"widget"}"#),
        )
        .await;

        assert!(matches!(
            result,
            Err(ApiError::MethodNotAllowed { expected: "POST", .. })
        ));
        assert!(store.scan().await.unwrap().is_empty());
    }
}
