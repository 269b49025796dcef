//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! The `Database` from `stockscan-db` holds a `SqlitePool`, which is
//! thread-safe on its own, so no extra locking happens here.

use stockscan_db::{Database, InventoryRepository};

/// Wrapper around `Database` for the application state.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Inventory repository backed by this connection.
    pub fn inventory(&self) -> InventoryRepository {
        self.db.inventory()
    }
}
