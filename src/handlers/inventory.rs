use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Admin, InventoryItem, InventoryPatch, NewInventoryItem},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_inventory(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryItem<Admin>>>> {
    let start = Instant::now();
    let items = state.inventory.list().await?;

    info!(
        count = items.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed inventory"
    );

    Ok(Json(items))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_inventory(
    State(state): State<AppState>,
    payload: Result<Json<NewInventoryItem>, JsonRejection>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    let Json(payload) = payload?;

    let start = Instant::now();
    let item = state.inventory.create(payload).await?;

    info!(
        id = %item.id,
        product_name = %item.product_name,
        elapsed_ms = start.elapsed().as_millis(),
        "Created inventory item"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_inventory(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<InventoryPatch>, JsonRejection>,
) -> AppResult<Json<InventoryItem>> {
    let Path(id) = id?;
    let Json(patch) = payload?;

    let start = Instant::now();
    let item = state.inventory.update(id, patch).await?;

    info!(id = %id, elapsed_ms = start.elapsed().as_millis(), "Updated inventory item");

    Ok(Json(item))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_inventory(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<serde_json::Value>> {
    let Path(id) = id?;

    let start = Instant::now();
    let removed = state.inventory.delete(id).await?;

    info!(
        id = %id,
        product_name = %removed.product_name,
        elapsed_ms = start.elapsed().as_millis(),
        "Deleted inventory item"
    );

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
