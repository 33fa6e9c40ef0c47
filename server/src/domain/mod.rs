//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no HTTP knowledge.

mod entity;
mod grocery_list;
mod ids;
mod item;

pub use entity::{DomainError, DomainResult, Entity};
pub use grocery_list::{
    default_list_name, normalize_list_name, GroceryList, ListEntry, PopulatedList,
    DEFAULT_LIST_NAME,
};
pub use ids::{ItemId, ListId, OwnerId};
pub use item::{Item, MAX_NAME_LEN};
