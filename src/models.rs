use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored item, keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: String,
    pub name: String,
}

impl Item {
    /// Create an item with a freshly minted random id
    pub fn with_new_id(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
        }
    }
}

/// Request body for create and update
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemBody {
    pub name: String,
}

/// Body of GET /items and GET /items/{id}
///
/// A missing single item serializes as `null`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetItemsResponse {
    One(Option<Item>),
    All(Vec<Item>),
}

/// Empty JSON object returned by DELETE
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {}
