mod admin;
mod inventory;

pub use admin::Admin;
pub use inventory::{InventoryDraft, InventoryItem, InventoryPatch, NewInventoryItem, ValidationError};
