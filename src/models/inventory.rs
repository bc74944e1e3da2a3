use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Admin;

const PRODUCT_NAME: &str = "productName";
const BUYING_PRICE: &str = "buyingPrice";
const SELLING_PRICE: &str = "sellingPrice";
const SUPPLIER_NAME: &str = "supplierName";
const CATEGORY: &str = "category";

/// Catalog entry as stored. `A` is the shape of the admin reference: the raw
/// id on write paths, the expanded [`Admin`] on list.
///
/// Prices are kept as the text the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem<A = Uuid> {
    pub id: Uuid,
    pub product_name: String,
    pub admin: Option<A>,
    pub buying_price: String,
    pub selling_price: String,
    pub supplier_name: String,
    pub category: String,
}

impl InventoryItem {
    pub fn from_draft(id: Uuid, draft: InventoryDraft) -> Self {
        Self {
            id,
            product_name: draft.product_name,
            admin: draft.admin,
            buying_price: draft.buying_price,
            selling_price: draft.selling_price,
            supplier_name: draft.supplier_name,
            category: draft.category,
        }
    }

    /// Overwrite only the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: InventoryPatch) {
        if let Some(v) = patch.product_name {
            self.product_name = v;
        }
        if let Some(admin) = patch.admin {
            self.admin = admin;
        }
        if let Some(v) = patch.buying_price {
            self.buying_price = v;
        }
        if let Some(v) = patch.selling_price {
            self.selling_price = v;
        }
        if let Some(v) = patch.supplier_name {
            self.supplier_name = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
    }

    /// Swap the admin id for the admin document. Dangling ids become `None`.
    pub fn expand(self, admins: &HashMap<Uuid, Admin>) -> InventoryItem<Admin> {
        InventoryItem {
            admin: self.admin.and_then(|id| admins.get(&id).cloned()),
            id: self.id,
            product_name: self.product_name,
            buying_price: self.buying_price,
            selling_price: self.selling_price,
            supplier_name: self.supplier_name,
            category: self.category,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of a create request. Every field is optional at the parsing stage so
/// that missing ones are reported together by [`NewInventoryItem::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[serde(default, deserialize_with = "text::optional")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub admin: Option<Uuid>,
    #[serde(default, deserialize_with = "text::optional")]
    pub buying_price: Option<String>,
    #[serde(default, deserialize_with = "text::optional")]
    pub selling_price: Option<String>,
    #[serde(default, deserialize_with = "text::optional")]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "text::optional")]
    pub category: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDraft {
    pub product_name: String,
    pub admin: Option<Uuid>,
    pub buying_price: String,
    pub selling_price: String,
    pub supplier_name: String,
    pub category: String,
}

impl NewInventoryItem {
    pub fn validate(self) -> Result<InventoryDraft, ValidationError> {
        let mut missing = Vec::new();
        let mut take = |field: &'static str, value: Option<String>| match value {
            Some(v) if !is_blank(&v) => v,
            _ => {
                missing.push(field);
                String::new()
            }
        };

        let draft = InventoryDraft {
            product_name: take(PRODUCT_NAME, self.product_name),
            admin: self.admin,
            buying_price: take(BUYING_PRICE, self.buying_price),
            selling_price: take(SELLING_PRICE, self.selling_price),
            supplier_name: take(SUPPLIER_NAME, self.supplier_name),
            category: take(CATEGORY, self.category),
        };

        if missing.is_empty() {
            Ok(draft)
        } else {
            Err(ValidationError { fields: missing })
        }
    }
}

/// Body of an update request. `None` means "leave as is". A JSON `null` on a
/// required field arrives as an empty string so validation rejects it; on
/// `admin` it arrives as `Some(None)` and clears the reference.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(default, deserialize_with = "text::supplied")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "text::nullable")]
    pub admin: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "text::supplied")]
    pub buying_price: Option<String>,
    #[serde(default, deserialize_with = "text::supplied")]
    pub selling_price: Option<String>,
    #[serde(default, deserialize_with = "text::supplied")]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "text::supplied")]
    pub category: Option<String>,
}

impl InventoryPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields: Vec<&'static str> = [
            (PRODUCT_NAME, &self.product_name),
            (BUYING_PRICE, &self.buying_price),
            (SELLING_PRICE, &self.selling_price),
            (SUPPLIER_NAME, &self.supplier_name),
            (CATEGORY, &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(is_blank))
        .map(|(field, _)| field)
        .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("inventory validation failed: {}", describe(.fields))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

fn describe(fields: &[&'static str]) -> String {
    fields
        .iter()
        .map(|field| format!("{field} is required"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lenient text fields: strings pass through, numbers and booleans are kept
/// as their JSON text.
mod text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Number(serde_json::Number),
        Bool(bool),
    }

    impl From<Text> for String {
        fn from(text: Text) -> Self {
            match text {
                Text::Str(s) => s,
                Text::Number(n) => number_text(&n),
                Text::Bool(b) => b.to_string(),
            }
        }
    }

    /// Integral floats print without a fraction (`1.0` → `"1"`, `1e2` → `"100"`)
    /// while they stay within the exactly representable integer range.
    fn number_text(n: &serde_json::Number) -> String {
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

        match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        }
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Text>::deserialize(deserializer)?.map(String::from))
    }

    /// Only called when the key is present, so `null` becomes an empty value.
    pub fn supplied<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Some(optional(deserializer)?.unwrap_or_default()))
    }

    pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
