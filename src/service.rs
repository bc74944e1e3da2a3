use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::db::InventoryStore;
use crate::error::{AppError, AppResult};
use crate::models::{Admin, InventoryItem, InventoryPatch, NewInventoryItem};

pub const UPDATE_NOT_FOUND: &str = "Product not found!";
pub const DELETE_NOT_FOUND: &str = "Product not found";

/// The four catalog operations. Holds nothing but a handle to the store, so
/// it is built once at startup and cloned into every request.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(store: impl InventoryStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Every item with its admin reference expanded.
    pub async fn list(&self) -> AppResult<Vec<InventoryItem<Admin>>> {
        let items = self.store.list_items().await.map_err(|e| e.on_read())?;

        let mut admin_ids: Vec<Uuid> = items.iter().filter_map(|item| item.admin).collect();
        admin_ids.sort_unstable();
        admin_ids.dedup();

        let admins: HashMap<Uuid, Admin> = self
            .store
            .find_admins(&admin_ids)
            .await
            .map_err(|e| e.on_read())?
            .into_iter()
            .map(|admin| (admin.id, admin))
            .collect();

        Ok(items.into_iter().map(|item| item.expand(&admins)).collect())
    }

    pub async fn create(&self, payload: NewInventoryItem) -> AppResult<InventoryItem> {
        let draft = payload.validate()?;
        self.store.insert_item(draft).await.map_err(|e| e.on_write())
    }

    pub async fn update(&self, id: Uuid, patch: InventoryPatch) -> AppResult<InventoryItem> {
        patch.validate()?;
        self.store
            .update_item(id, patch)
            .await
            .map_err(|e| e.on_write())?
            .ok_or(AppError::NotFound(UPDATE_NOT_FOUND))
    }

    /// Returns the removed item.
    pub async fn delete(&self, id: Uuid) -> AppResult<InventoryItem> {
        self.store
            .delete_item(id)
            .await
            .map_err(|e| e.on_write())?
            .ok_or(AppError::NotFound(DELETE_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryInventoryStore, StoreError, StoreResult};
    use crate::models::InventoryDraft;
    use async_trait::async_trait;
    use serde_json::json;

    fn pen_payload() -> NewInventoryItem {
        serde_json::from_value(json!({
            "productName": "Pen",
            "buyingPrice": "1",
            "sellingPrice": "2",
            "supplierName": "Acme",
            "category": "Stationery",
        }))
        .unwrap()
    }

    /// Store whose every call fails, for checking fault classification.
    struct BrokenStore;

    #[async_trait]
    impl InventoryStore for BrokenStore {
        async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find_admins(&self, _ids: &[Uuid]) -> StoreResult<Vec<Admin>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn insert_item(&self, _draft: InventoryDraft) -> StoreResult<InventoryItem> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn update_item(&self, _id: Uuid, _patch: InventoryPatch) -> StoreResult<Option<InventoryItem>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn delete_item(&self, _id: Uuid) -> StoreResult<Option<InventoryItem>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn list_expands_each_admin_once() {
        let admin = Admin::new(Uuid::new_v4(), json!({ "name": "Ada" }).as_object().cloned().unwrap());
        let service = InventoryService::new(MemoryInventoryStore::with_admins([admin.clone()]));

        for _ in 0..2 {
            let mut payload = pen_payload();
            payload.admin = Some(admin.id);
            service.create(payload).await.unwrap();
        }

        let items = service.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.admin.as_ref() == Some(&admin)));
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let service = InventoryService::new(MemoryInventoryStore::new());
        let mut payload = pen_payload();
        payload.category = None;

        let err = service.create(payload).await.unwrap_err();
        assert!(matches!(err, AppError::ClientFault(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_patch_leaves_item_unchanged() {
        let service = InventoryService::new(MemoryInventoryStore::new());
        let created = service.create(pen_payload()).await.unwrap();

        let patch: InventoryPatch =
            serde_json::from_value(json!({ "productName": "", "category": "Office" })).unwrap();
        let err = service.update(created.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::ClientFault(_)));

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].category, "Stationery");
    }

    #[tokio::test]
    async fn missing_ids_map_to_distinct_messages() {
        let service = InventoryService::new(MemoryInventoryStore::new());
        let id = Uuid::new_v4();

        let update = service.update(id, InventoryPatch::default()).await.unwrap_err();
        assert!(matches!(update, AppError::NotFound(UPDATE_NOT_FOUND)));

        let delete = service.delete(id).await.unwrap_err();
        assert!(matches!(delete, AppError::NotFound(DELETE_NOT_FOUND)));
    }

    #[tokio::test]
    async fn read_faults_are_server_faults_and_write_faults_client_faults() {
        let service = InventoryService::new(BrokenStore);

        assert!(matches!(service.list().await, Err(AppError::ServerFault(_))));
        assert!(matches!(service.create(pen_payload()).await, Err(AppError::ClientFault(_))));
        assert!(matches!(
            service.update(Uuid::new_v4(), InventoryPatch::default()).await,
            Err(AppError::ClientFault(_))
        ));
        assert!(matches!(service.delete(Uuid::new_v4()).await, Err(AppError::ClientFault(_))));
    }
}
