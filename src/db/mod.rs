mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Admin, InventoryDraft, InventoryItem, InventoryPatch};

pub use memory::MemoryInventoryStore;
pub use postgres::PgInventoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for inventory items plus read access to the admins they point at.
///
/// Every method is a single round trip to the backing store.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, oldest first.
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Admins with the given ids. Unknown ids are silently skipped.
    async fn find_admins(&self, ids: &[Uuid]) -> StoreResult<Vec<Admin>>;

    async fn insert_item(&self, draft: InventoryDraft) -> StoreResult<InventoryItem>;

    /// Merge `patch` into the item and return the result, or `None` if no item has `id`.
    async fn update_item(&self, id: Uuid, patch: InventoryPatch) -> StoreResult<Option<InventoryItem>>;

    /// Remove the item and return what was removed, or `None` if no item has `id`.
    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<InventoryItem>>;
}
