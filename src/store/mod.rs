//! Item persistence.
//!
//! Handlers only see the [`ItemStore`] trait. The concrete store is built once
//! at startup by [`connect`] and shared through `AppState`.

mod memory;
mod spanner;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::models::Item;

/// Failure of a store operation.
///
/// The set of kinds is closed so that HTTP classification is a total match.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing table (or database resource) does not exist
    #[error("table resource not found: {0}")]
    TableNotFound(String),
    /// Any other failure reported by the store
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Key-value collaborator holding items keyed by `id`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes the full item, replacing any item with the same id.
    async fn put(&self, item: &Item) -> StoreResult<()>;

    /// Looks up one item. A missing key is `Ok(None)`, not an error.
    async fn get(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Returns every stored item in one pass, in no particular order.
    async fn scan(&self) -> StoreResult<Vec<Item>>;

    /// Sets `name` on the item with the given id and returns the new state.
    ///
    /// Absent ids are created.
    async fn update(&self, id: &str, name: &str) -> StoreResult<Item>;

    /// Removes the item. Deleting an absent key succeeds.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Verifies the store is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Builds the store selected by the configuration.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn ItemStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory item store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Spanner => {
            let spanner = config
                .spanner
                .as_ref()
                .context("Spanner backend selected without Spanner configuration")?;
            let store = SpannerStore::from_config(spanner, &config.items_table).await?;
            Ok(Arc::new(store))
        }
    }
}
