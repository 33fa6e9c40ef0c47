//! Client Models
//!
//! Data structures matching the API's JSON.

use serde::{Deserialize, Serialize};

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: Option<f64>,
    pub store: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Populated list entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub item: Item,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub item_name: Option<String>,
    pub price: Option<f64>,
    pub store: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl ListEntry {
    /// Snapshot name if recorded, otherwise the live item's
    pub fn display_name(&self) -> &str {
        self.item_name.as_deref().unwrap_or(&self.item.name)
    }

    pub fn display_price(&self) -> Option<f64> {
        self.price.or(self.item.price)
    }

    pub fn display_store(&self) -> Option<&str> {
        self.store.as_deref().or(self.item.store.as_deref())
    }
}

/// Grocery list data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    pub id: String,
    pub list_name: String,
    #[serde(default)]
    pub items: Vec<ListEntry>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddItemResponse {
    pub message: String,
    pub list: GroceryList,
}

/// Error body returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: Option<String>,
}
