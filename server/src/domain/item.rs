//! Item Entity
//!
//! A grocery item. Lists reference items; they never own them.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};
use super::ids::ItemId;

/// Upper bound for item and list names, in characters
pub const MAX_NAME_LEN: usize = 100;

/// A grocery item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Current price
    pub price: Option<f64>,
    /// Store selling the item
    pub store: Option<String>,
    pub category: Option<String>,
    /// Creation time (ms since epoch)
    pub created_at: i64,
}

impl Item {
    /// Create a new item with a fresh id
    pub fn new(name: String) -> Self {
        Self {
            id: ItemId::generate(),
            name,
            price: None,
            store: None,
            category: None,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Check the fields that are enforced at persistence time
    ///
    /// Trims `name` and the optional text fields in place.
    pub fn validate(mut self) -> DomainResult<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(DomainError::InvalidInput("item name is required".to_string()));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidInput(format!(
                "item name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::InvalidInput(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        self.store = trim_optional(self.store);
        self.category = trim_optional(self.category);
        Ok(self)
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
