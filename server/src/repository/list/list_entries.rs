//! Line entry operations
//!
//! Entries live in `grocery_list_items`, keyed by `(list_id, item_id)` and
//! ordered by `position`.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, GroceryList, Item, ItemId, ListEntry, ListId, PopulatedList};
use crate::repository::item_repo::row_to_item;
use crate::repository::traits::AddOutcome;

/// Load the entries of `list_id` with their items resolved
pub(super) fn load_populated_entries(
    conn: &Connection,
    list_id: &ListId,
) -> rusqlite::Result<Vec<ListEntry<Item>>> {
    let mut stmt = conn.prepare(
        "SELECT e.quantity, e.item_name, e.price, e.store,
                i.id, i.name, i.price, i.store, i.category, i.created_at
         FROM grocery_list_items e
         JOIN items i ON i.id = e.item_id
         WHERE e.list_id = ?1
         ORDER BY e.position",
    )?;

    let entries = stmt
        .query_map(params![list_id], |row| {
            let entry: ListEntry<ItemId> = ListEntry {
                item: row.get(4)?,
                quantity: row.get(0)?,
                item_name: row.get(1)?,
                price: row.get(2)?,
                store: row.get(3)?,
            };
            Ok(entry.populate(row_to_item(row, 4)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Attach the populated entries to a bare list row
pub(super) fn populate(
    conn: &Connection,
    list: GroceryList<ItemId>,
) -> rusqlite::Result<PopulatedList> {
    let items = load_populated_entries(conn, &list.id)?;
    Ok(GroceryList {
        id: list.id,
        list_name: list.list_name,
        items,
        created_by: list.created_by,
        created_at: list.created_at,
        updated_at: list.updated_at,
    })
}

/// Append `entry` to `list_id` unless the item is already referenced
///
/// The list and item existence checks, the membership check and the insert
/// all happen in one transaction.
pub(super) fn add_entry(
    conn: &mut Connection,
    list_id: &ListId,
    entry: ListEntry<ItemId>,
) -> DomainResult<AddOutcome> {
    let tx = conn.transaction()?;

    let list_exists = tx
        .query_row(
            "SELECT 1 FROM grocery_lists WHERE id = ?1",
            params![list_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !list_exists {
        return Err(DomainError::NotFound(format!("Grocery list {} not found", list_id)));
    }

    let item_exists = tx
        .query_row("SELECT 1 FROM items WHERE id = ?1", params![entry.item], |_| Ok(()))
        .optional()?
        .is_some();
    if !item_exists {
        return Err(DomainError::NotFound(format!("Item {} not found", entry.item)));
    }

    let already_present = tx
        .query_row(
            "SELECT 1 FROM grocery_list_items WHERE list_id = ?1 AND item_id = ?2",
            params![list_id, entry.item],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if already_present {
        return Ok(AddOutcome::AlreadyPresent);
    }

    let position: i64 = tx.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM grocery_list_items WHERE list_id = ?1",
        params![list_id],
        |row| row.get(0),
    )?;

    tx.execute(
        "INSERT INTO grocery_list_items (list_id, item_id, position, quantity, item_name, price, store)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            list_id,
            entry.item,
            position,
            entry.quantity,
            entry.item_name,
            entry.price,
            entry.store
        ],
    )?;
    tx.execute(
        "UPDATE grocery_lists SET updated_at = ?1 WHERE id = ?2",
        params![chrono::Utc::now().timestamp_millis(), list_id],
    )?;

    tx.commit()?;
    Ok(AddOutcome::Added)
}
