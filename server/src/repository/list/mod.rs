//! Grocery List Repository Module
//!
//! - list_repo: list creation, lookup and the `GroceryListOperations` impl
//! - list_entries: line entry reads (population) and the add-item transaction

mod list_entries;
mod list_repo;

pub use list_repo::GroceryListRepository;
