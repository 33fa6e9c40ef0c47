//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod item_repo;
mod list;
mod traits;

#[cfg(test)]
mod tests;

pub use db::{init_db, DbState, SharedConnection, LIST_SEQUENCE};
pub use item_repo::ItemRepository;
pub use list::GroceryListRepository;
pub use traits::{AddOutcome, GroceryListOperations, Repository};
