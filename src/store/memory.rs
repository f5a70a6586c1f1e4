use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ItemStore, StoreResult};
use crate::models::Item;

/// Process-local item store
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put(&self, item: &Item) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        tracing::debug!("Put item with id: {}", item.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let items: Vec<Item> = self.items.read().await.values().cloned().collect();
        tracing::debug!("Scanned {} items", items.len());
        Ok(items)
    }

    async fn update(&self, id: &str, name: &str) -> StoreResult<Item> {
        let mut items = self.items.write().await;
        let item = items
            .entry(id.to_string())
            .or_insert_with(|| Item {
                id: id.to_string(),
                name: String::new(),
            });
        item.name = name.to_string();
        tracing::debug!("Updated item with id: {}", id);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let removed = self.items.write().await.remove(id).is_some();
        tracing::debug!("Deleted item with id: {} (existed: {})", id, removed);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store.put(&item("a", "widget")).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(item("a", "widget")));
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_id() {
        let store = MemoryStore::new();
        store.put(&item("a", "widget")).await.unwrap();
        store.put(&item("a", "gadget")).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(item("a", "gadget")));
        assert_eq!(store.scan().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_scan_returns_all_items() {
        let store = MemoryStore::new();
        assert!(store.scan().await.unwrap().is_empty());

        store.put(&item("a", "one")).await.unwrap();
        store.put(&item("b", "two")).await.unwrap();

        let mut items = store.scan().await.unwrap();
        items.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(items, vec![item("a", "one"), item("b", "two")]);
    }

    #[tokio::test]
    async fn test_update_existing_and_absent() {
        let store = MemoryStore::new();
        store.put(&item("a", "widget")).await.unwrap();

        let updated = store.update("a", "gadget").await.unwrap();
        assert_eq!(updated, item("a", "gadget"));
        assert_eq!(store.get("a").await.unwrap(), Some(item("a", "gadget")));

        // Update doubles as upsert
        let created = store.update("b", "gizmo").await.unwrap();
        assert_eq!(created, item("b", "gizmo"));
        assert_eq!(store.get("b").await.unwrap(), Some(item("b", "gizmo")));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put(&item("a", "widget")).await.unwrap();

        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_items() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.put(&item("a", "widget")).await.unwrap();

        assert_eq!(other.get("a").await.unwrap(), Some(item("a", "widget")));
        assert!(other.health_check().await.is_ok());
    }
}
