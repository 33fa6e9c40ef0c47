//! Grocery List Entity
//!
//! A named, owned list of line entries. Each entry references an [`Item`]
//! and may carry a point-in-time snapshot of the item's name, price and
//! store. The snapshot is a field-level cache: it is written only when the
//! caller supplies it and is never reconciled with the live item.
//!
//! `GroceryList<R>` is generic over the entry reference so the same shape
//! serves both the stored form (`R = ItemId`) and the populated form
//! (`R = Item`).

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult};
use super::ids::{ItemId, ListId, OwnerId};
use super::item::{Item, MAX_NAME_LEN};

/// Name given to a list when nothing else applies
pub const DEFAULT_LIST_NAME: &str = "List 1";

/// One element of a list's `items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry<R = ItemId> {
    /// Referenced item (bare id or populated document)
    pub item: R,
    pub quantity: u32,
    // Snapshot fields
    pub item_name: Option<String>,
    pub price: Option<f64>,
    pub store: Option<String>,
}

impl ListEntry<ItemId> {
    /// Bare reference with default quantity
    pub fn new(item: ItemId) -> Self {
        Self {
            item,
            quantity: 1,
            item_name: None,
            price: None,
            store: None,
        }
    }

    pub fn validate(self) -> DomainResult<Self> {
        if self.quantity == 0 {
            return Err(DomainError::InvalidInput("quantity must be at least 1".to_string()));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::InvalidInput(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(self)
    }

    /// Attach the resolved item document
    pub fn populate(self, item: Item) -> ListEntry<Item> {
        ListEntry {
            item,
            quantity: self.quantity,
            item_name: self.item_name,
            price: self.price,
            store: self.store,
        }
    }
}

/// A grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList<R = ItemId> {
    /// Unique identifier
    pub id: ListId,
    /// Display name (trimmed, bounded)
    pub list_name: String,
    /// Entries in insertion order
    pub items: Vec<ListEntry<R>>,
    /// Owning user
    pub created_by: OwnerId,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A list whose entries carry full item documents
pub type PopulatedList = GroceryList<Item>;

impl<R> GroceryList<R> {
    /// Create an empty list with a fresh id
    pub fn new(list_name: String, created_by: OwnerId) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: ListId::generate(),
            list_name,
            items: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalize a requested list name
///
/// Returns `None` for absent or blank names, meaning a default name applies.
pub fn normalize_list_name(name: Option<&str>) -> DomainResult<Option<String>> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidInput(format!(
            "listName must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(Some(name.to_string()))
}

/// Default name for the `sequence`-th list
pub fn default_list_name(sequence: i64) -> String {
    if sequence < 1 {
        return DEFAULT_LIST_NAME.to_string();
    }
    format!("List {sequence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> OwnerId {
        OwnerId::new("alice").unwrap()
    }

    #[test]
    fn test_list_creation() {
        let list: GroceryList = GroceryList::new("Weekly".to_string(), owner());
        assert_eq!(list.list_name, "Weekly");
        assert!(list.items.is_empty());
        assert_eq!(list.created_at, list.updated_at);
    }

    #[test]
    fn test_normalize_list_name() {
        assert_eq!(normalize_list_name(None).unwrap(), None);
        assert_eq!(normalize_list_name(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_list_name(Some("  Party  ")).unwrap(),
            Some("Party".to_string())
        );
        let max = "a".repeat(MAX_NAME_LEN);
        assert_eq!(normalize_list_name(Some(&max)).unwrap(), Some(max.clone()));
        assert!(normalize_list_name(Some(&format!("{max}a"))).is_err());
    }

    #[test]
    fn test_default_list_name() {
        assert_eq!(default_list_name(1), "List 1");
        assert_eq!(default_list_name(7), "List 7");
        assert_eq!(default_list_name(0), DEFAULT_LIST_NAME);
    }

    #[test]
    fn test_entry_defaults_and_validation() {
        let entry = ListEntry::new(ItemId::from("i1"));
        assert_eq!(entry.quantity, 1);
        assert!(entry.item_name.is_none());

        let mut zero = ListEntry::new(ItemId::from("i1"));
        zero.quantity = 0;
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_populated_entry_serializes_item_document() {
        let item = Item::new("Milk".to_string());
        let entry = ListEntry::new(item.id.clone()).populate(item);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["item"]["name"], "Milk");
        assert_eq!(json["quantity"], 1);
        assert!(json["itemName"].is_null());
    }
}
