use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An administrator record owned by another service. Inventory items only
/// hold its id; the rest of the document is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Admin {
    pub fn new(id: Uuid, mut profile: Map<String, Value>) -> Self {
        // `id` is always the column value, never a key from the document.
        profile.remove("id");
        Self { id, profile }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_is_flattened_next_to_id() {
        let id = Uuid::new_v4();
        let profile = json!({ "name": "Ada", "email": "ada@example.com" });
        let admin = Admin::new(id, profile.as_object().cloned().unwrap());

        let value = serde_json::to_value(&admin).unwrap();
        assert_eq!(value["id"], json!(id));
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
    }

    #[test]
    fn stored_id_key_does_not_shadow_real_id() {
        let id = Uuid::new_v4();
        let profile = json!({ "id": "something-else", "name": "Ada" });
        let admin = Admin::new(id, profile.as_object().cloned().unwrap());

        assert!(!admin.profile.contains_key("id"));
        assert_eq!(serde_json::to_value(&admin).unwrap()["id"], json!(id));
    }
}
