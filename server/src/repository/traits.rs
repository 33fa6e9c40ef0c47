//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::{
    DomainResult, Entity, ItemId, ListEntry, ListId, OwnerId, PopulatedList,
};

/// Core repository trait for create/read operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities, oldest first
    async fn list(&self) -> DomainResult<Vec<T>>;
}

/// Result of attaching an item to a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended
    Added,
    /// The list already referenced the item; nothing changed
    AlreadyPresent,
}

/// Grocery list operations that go beyond plain CRUD
#[async_trait]
pub trait GroceryListOperations: Send + Sync {
    /// Create an empty list
    ///
    /// A `None` name is replaced by `"List <n>"`, `n` drawn from the list
    /// sequence in the same transaction as the insert.
    async fn create_list(
        &self,
        name: Option<String>,
        created_by: OwnerId,
    ) -> DomainResult<PopulatedList>;

    /// Append `entry` unless the list already references its item
    async fn add_entry(&self, list_id: &ListId, entry: ListEntry<ItemId>) -> DomainResult<AddOutcome>;

    /// One list with item references resolved
    async fn find_populated(&self, list_id: &ListId) -> DomainResult<Option<PopulatedList>>;

    /// Every list with item references resolved
    async fn list_populated(&self) -> DomainResult<Vec<PopulatedList>>;

    /// Number of stored lists
    async fn count(&self) -> DomainResult<u64>;
}
