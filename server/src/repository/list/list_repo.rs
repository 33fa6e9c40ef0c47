//! Grocery List Repository - Core Operations
//!
//! SQLite-backed implementation for grocery lists.
//! Entry-level operations are in `list_entries`.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{
    default_list_name, normalize_list_name, DomainResult, GroceryList, ItemId, ListEntry, ListId,
    OwnerId, PopulatedList,
};
use crate::repository::db::{next_sequence, not_ready, SharedConnection, LIST_SEQUENCE};
use crate::repository::traits::{AddOutcome, GroceryListOperations};
use super::list_entries;

const LIST_COLUMNS: &str = "id, list_name, created_by, created_at, updated_at";

/// SQLite implementation of the GroceryList repository
#[derive(Clone)]
pub struct GroceryListRepository {
    conn: SharedConnection,
}

impl GroceryListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn insert_list(conn: &Connection, list: &GroceryList<ItemId>) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO grocery_lists (id, list_name, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            list.id,
            list.list_name,
            list.created_by.as_str(),
            list.created_at,
            list.updated_at
        ],
    )?;
    Ok(())
}

fn find_list_row(conn: &Connection, id: &ListId) -> rusqlite::Result<Option<GroceryList<ItemId>>> {
    conn.query_row(
        &format!("SELECT {LIST_COLUMNS} FROM grocery_lists WHERE id = ?1"),
        params![id],
        row_to_list,
    )
    .optional()
}

fn all_list_rows(conn: &Connection) -> rusqlite::Result<Vec<GroceryList<ItemId>>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LIST_COLUMNS} FROM grocery_lists ORDER BY created_at, rowid"
    ))?;
    let rows = stmt.query_map([], row_to_list)?;
    rows.collect()
}

/// Convert a database row to a list without entries
fn row_to_list(row: &rusqlite::Row) -> rusqlite::Result<GroceryList<ItemId>> {
    let created_by: String = row.get(2)?;
    let created_by = OwnerId::new(&created_by).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(GroceryList {
        id: row.get(0)?,
        list_name: row.get(1)?,
        items: Vec::new(),
        created_by,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Stored form of a list, entries as bare item references
#[cfg(test)]
impl GroceryListRepository {
    pub(crate) async fn find_bare(&self, id: &ListId) -> DomainResult<Option<GroceryList<ItemId>>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        let Some(mut list) = find_list_row(conn, id)? else {
            return Ok(None);
        };
        let mut stmt = conn.prepare(
            "SELECT item_id, quantity, item_name, price, store
             FROM grocery_list_items WHERE list_id = ?1 ORDER BY position",
        )?;
        list.items = stmt
            .query_map(params![id], |row| {
                Ok(ListEntry {
                    item: row.get(0)?,
                    quantity: row.get(1)?,
                    item_name: row.get(2)?,
                    price: row.get(3)?,
                    store: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(Some(list))
    }
}

#[async_trait]
impl GroceryListOperations for GroceryListRepository {
    async fn create_list(
        &self,
        name: Option<String>,
        created_by: OwnerId,
    ) -> DomainResult<PopulatedList> {
        let requested = normalize_list_name(name.as_deref())?;

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_ready)?;
        let tx = conn.transaction()?;

        let sequence = next_sequence(&tx, LIST_SEQUENCE)?;
        let list_name = requested.unwrap_or_else(|| default_list_name(sequence));
        let list: GroceryList<ItemId> = GroceryList::new(list_name, created_by);
        insert_list(&tx, &list)?;
        tx.commit()?;

        tracing::info!(list_id = %list.id, list_name = %list.list_name, "grocery list created");
        Ok(GroceryList {
            id: list.id,
            list_name: list.list_name,
            items: Vec::new(),
            created_by: list.created_by,
            created_at: list.created_at,
            updated_at: list.updated_at,
        })
    }

    async fn add_entry(&self, list_id: &ListId, entry: ListEntry<ItemId>) -> DomainResult<AddOutcome> {
        let entry = entry.validate()?;
        let item_id = entry.item.clone();

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_ready)?;
        let outcome = list_entries::add_entry(conn, list_id, entry)?;

        tracing::info!(list_id = %list_id, item_id = %item_id, ?outcome, "add item to list");
        Ok(outcome)
    }

    async fn find_populated(&self, list_id: &ListId) -> DomainResult<Option<PopulatedList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        match find_list_row(conn, list_id)? {
            Some(list) => Ok(Some(list_entries::populate(conn, list)?)),
            None => Ok(None),
        }
    }

    async fn list_populated(&self) -> DomainResult<Vec<PopulatedList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        let lists = all_list_rows(conn)?
            .into_iter()
            .map(|list| list_entries::populate(conn, list))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    async fn count(&self) -> DomainResult<u64> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM grocery_lists", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
