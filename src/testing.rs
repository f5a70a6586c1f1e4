//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};

use crate::config::{Config, StoreBackend};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use crate::store::{ItemStore, MemoryStore, StoreError, StoreResult};

/// Serializes tests that read or write process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Which failure a [`FailingStore`] reports
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    TableNotFound,
    Other,
}

/// Store whose every operation fails the same way
pub struct FailingStore(pub Failure);

impl FailingStore {
    fn fail<T>(&self) -> StoreResult<T> {
        Err(match self.0 {
            Failure::TableNotFound => StoreError::TableNotFound("items".to_string()),
            Failure::Other => StoreError::Other(anyhow::anyhow!("connection reset")),
        })
    }
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn put(&self, _item: &Item) -> StoreResult<()> {
        self.fail()
    }

    async fn get(&self, _id: &str) -> StoreResult<Option<Item>> {
        self.fail()
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        self.fail()
    }

    async fn update(&self, _id: &str, _name: &str) -> StoreResult<Item> {
        self.fail()
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        self.fail()
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.fail()
    }
}

pub fn test_config() -> Config {
    Config {
        store_backend: StoreBackend::Memory,
        spanner: None,
        items_table: "items".to_string(),
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    }
}

pub fn test_state(store: Arc<dyn ItemStore>) -> AppState {
    AppState {
        store,
        config: Arc::new(test_config()),
    }
}

/// Full router over a fresh in-memory store
pub fn memory_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let app = routes::router(test_state(Arc::new(store.clone())));
    (app, store)
}

/// Full router over a store that always fails
pub fn failing_app(failure: Failure) -> Router {
    routes::router(test_state(Arc::new(FailingStore(failure))))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
