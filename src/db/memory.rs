use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{InventoryStore, StoreResult};
use crate::models::{Admin, InventoryDraft, InventoryItem, InventoryPatch};

/// Process-local store. `IndexMap` keeps insertion order so listing behaves
/// like the Postgres store.
#[derive(Debug, Default, Clone)]
pub struct MemoryInventoryStore {
    items: Arc<RwLock<IndexMap<Uuid, InventoryItem>>>,
    admins: Arc<RwLock<IndexMap<Uuid, Admin>>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_admins(admins: impl IntoIterator<Item = Admin>) -> Self {
        let admins = admins.into_iter().map(|a| (a.id, a)).collect();
        Self {
            items: Arc::default(),
            admins: Arc::new(RwLock::new(admins)),
        }
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_admins(&self, ids: &[Uuid]) -> StoreResult<Vec<Admin>> {
        let admins = self.admins.read().await;
        Ok(ids.iter().filter_map(|id| admins.get(id).cloned()).collect())
    }

    async fn insert_item(&self, draft: InventoryDraft) -> StoreResult<InventoryItem> {
        let item = InventoryItem::from_draft(Uuid::new_v4(), draft);
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: Uuid, patch: InventoryPatch) -> StoreResult<Option<InventoryItem>> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&id).map(|item| {
            item.apply(patch);
            item.clone()
        }))
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<InventoryItem>> {
        Ok(self.items.write().await.shift_remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> InventoryDraft {
        InventoryDraft {
            product_name: name.to_string(),
            admin: None,
            buying_price: "1".to_string(),
            selling_price: "2".to_string(),
            supplier_name: "Acme".to_string(),
            category: "Stationery".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryInventoryStore::new();
        let a = store.insert_item(draft("Pen")).await.unwrap();
        let b = store.insert_item(draft("Pen")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_after_delete() {
        let store = MemoryInventoryStore::new();
        let first = store.insert_item(draft("Zebra")).await.unwrap();
        let middle = store.insert_item(draft("Alpha")).await.unwrap();
        let last = store.insert_item(draft("Mango")).await.unwrap();

        store.delete_item(middle.id).await.unwrap();

        let ids: Vec<Uuid> = store.list_items().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first.id, last.id]);
    }

    #[tokio::test]
    async fn update_and_delete_miss_return_none() {
        let store = MemoryInventoryStore::new();
        let missing = Uuid::new_v4();
        assert!(store.update_item(missing, InventoryPatch::default()).await.unwrap().is_none());
        assert!(store.delete_item(missing).await.unwrap().is_none());
        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_admins_skips_unknown_ids() {
        let admin = Admin::new(Uuid::new_v4(), serde_json::Map::new());
        let store = MemoryInventoryStore::with_admins([admin.clone()]);

        let found = store.find_admins(&[Uuid::new_v4(), admin.id]).await.unwrap();
        assert_eq!(found, vec![admin]);
    }
}
