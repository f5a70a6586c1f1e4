// Route path constants - single source of truth for all API paths

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const ITEMS: &str = "/items";
pub const ITEMS_ITEM: &str = "/items/{id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(
            ITEMS,
            post(handlers::create_item_handler)
                .get(handlers::list_items_handler)
                .fallback(collection_method_not_allowed),
        )
        .route(
            ITEMS_ITEM,
            get(handlers::get_item_handler)
                .put(handlers::update_item_handler)
                .delete(handlers::delete_item_handler)
                .fallback(item_method_not_allowed),
        )
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Methods no route accepts get the same JSON error shape as the handlers' own guard.

async fn collection_method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        expected: "GET or POST",
        actual: method,
    }
}

async fn item_method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        expected: "GET, PUT or DELETE",
        actual: method,
    }
}
