//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Sequence backing default list names
pub const LIST_SEQUENCE: &str = "grocery_list";

/// Shared handle to the (possibly not yet opened) connection
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub db_path: PathBuf,
    /// Set when background initialization gave up
    init_error: Arc<Mutex<Option<String>>>,
}

impl DbState {
    /// Empty state; the connection is filled in once `init_db` completes
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
            init_error: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Move the connection of an initialized state into this one
    pub async fn adopt(&self, initialized: DbState) {
        let conn = initialized.conn.lock().await.take();
        *self.conn.lock().await = conn;
        *self.init_error.lock().await = None;
    }

    /// Remember why initialization failed
    pub async fn record_failure(&self, reason: String) {
        *self.init_error.lock().await = Some(reason);
    }

    pub async fn init_failure(&self) -> Option<String> {
        self.init_error.lock().await.clone()
    }
}

pub(crate) fn not_ready() -> DomainError {
    DomainError::NotReady("Database not initialized".to_string())
}

/// Open the database at `db_path` (":memory:" for an in-memory store) and migrate it
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn).map_err(|e| format!("Migration failed: {}", e))?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    tracing::debug!(path = %db_path.display(), "database ready");
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            price REAL,
            store TEXT,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS grocery_lists (
            id TEXT PRIMARY KEY,
            list_name TEXT NOT NULL DEFAULT 'List 1' CHECK (length(list_name) <= 100),
            created_by TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS grocery_list_items (
            list_id TEXT NOT NULL REFERENCES grocery_lists(id),
            item_id TEXT NOT NULL REFERENCES items(id),
            position INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            item_name TEXT,
            price REAL,
            store TEXT,
            PRIMARY KEY (list_id, item_id)
        );

        CREATE INDEX IF NOT EXISTS idx_list_items_position
            ON grocery_list_items(list_id, position);

        CREATE TABLE IF NOT EXISTS sequences (
            name TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        );",
    )?;

    // Added after the first schema
    if !column_exists(conn, "items", "category")? {
        conn.execute("ALTER TABLE items ADD COLUMN category TEXT", [])?;
    }

    // Seed the name sequence from lists created before it existed
    conn.execute(
        "INSERT OR IGNORE INTO sequences (name, value)
         SELECT ?1, COUNT(*) FROM grocery_lists",
        params![LIST_SEQUENCE],
    )?;

    Ok(())
}

/// Atomically bump a named sequence and return the new value
///
/// Callers run this inside the transaction that consumes the value.
pub(crate) fn next_sequence(conn: &Connection, name: &str) -> DomainResult<i64> {
    let value = conn
        .query_row(
            "UPDATE sequences SET value = value + 1 WHERE name = ?1 RETURNING value",
            params![name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;

    match value {
        Some(v) => Ok(v),
        None => {
            conn.execute(
                "INSERT INTO sequences (name, value) VALUES (?1, 1)",
                params![name],
            )?;
            Ok(1)
        }
    }
}
