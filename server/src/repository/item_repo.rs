//! Item Repository
//!
//! SQLite-backed storage for grocery items.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainResult, Item, ItemId};
use super::db::{not_ready, SharedConnection};
use super::traits::Repository;

pub(crate) const ITEM_COLUMNS: &str = "id, name, price, store, category, created_at";

/// SQLite implementation of the Item repository
#[derive(Clone)]
pub struct ItemRepository {
    conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let item = entity.clone().validate()?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;
        conn.execute(
            "INSERT INTO items (id, name, price, store, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![item.id, item.name, item.price, item.store, item.category, item.created_at],
        )?;

        tracing::debug!(item_id = %item.id, "item created");
        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> DomainResult<Option<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        let item = conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
                params![id],
                |row| row_to_item(row, 0),
            )
            .optional()?;
        Ok(item)
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_ready)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at, rowid"
        ))?;
        let items = stmt
            .query_map([], |row| row_to_item(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

/// Read an Item whose `ITEM_COLUMNS` start at column `offset`
pub(crate) fn row_to_item(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        price: row.get(offset + 2)?,
        store: row.get(offset + 3)?,
        category: row.get(offset + 4)?,
        created_at: row.get(offset + 5)?,
    })
}
