use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{InventoryStore, StoreResult};
use crate::models::{Admin, InventoryDraft, InventoryItem, InventoryPatch};

const ITEM_COLUMNS: &str =
    "id, product_name, admin, buying_price, selling_price, supplier_name, category";

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    product_name: String,
    admin: Option<Uuid>,
    buying_price: String,
    selling_price: String,
    supplier_name: String,
    category: String,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            admin: row.admin,
            buying_price: row.buying_price,
            selling_price: row.selling_price,
            supplier_name: row.supplier_name,
            category: row.category,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    document: Json<Map<String, Value>>,
}

#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    async fn find_admins(&self, ids: &[Uuid]) -> StoreResult<Vec<Admin>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AdminRow>(
            "SELECT id, document FROM admins WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Admin::new(row.id, row.document.0))
            .collect())
    }

    async fn insert_item(&self, draft: InventoryDraft) -> StoreResult<InventoryItem> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            INSERT INTO inventory (product_name, admin, buying_price, selling_price, supplier_name, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&draft.product_name)
        .bind(draft.admin)
        .bind(&draft.buying_price)
        .bind(&draft.selling_price)
        .bind(&draft.supplier_name)
        .bind(&draft.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_item(&self, id: Uuid, patch: InventoryPatch) -> StoreResult<Option<InventoryItem>> {
        // NULL binds keep the current value; `admin` needs an explicit flag
        // because NULL is also a legitimate new value for it.
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory
            SET product_name  = COALESCE($1, product_name),
                admin         = CASE WHEN $2 THEN $3 ELSE admin END,
                buying_price  = COALESCE($4, buying_price),
                selling_price = COALESCE($5, selling_price),
                supplier_name = COALESCE($6, supplier_name),
                category      = COALESCE($7, category)
            WHERE id = $8
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(patch.product_name.as_deref())
        .bind(patch.admin.is_some())
        .bind(patch.admin.flatten())
        .bind(patch.buying_price.as_deref())
        .bind(patch.selling_price.as_deref())
        .bind(patch.supplier_name.as_deref())
        .bind(patch.category.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "DELETE FROM inventory WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InventoryItem::from))
    }
}
