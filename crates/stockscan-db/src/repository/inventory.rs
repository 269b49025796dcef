//! # Inventory Repository
//!
//! Database operations for the `products` table.
//!
//! ## Read Path
//! The inventory tab runs exactly one query per mount:
//!
//! ```sql
//! SELECT itemID, itemName, itemQuantity FROM products ORDER BY itemID
//! ```
//!
//! The scan flow never writes here. `insert` exists for the seed tool.

use std::future::Future;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockscan_core::InventoryItem;

/// A read-only supplier of inventory rows, ordered by `itemID`.
///
/// The inventory tab is generic over this so it can be handed the database
/// or, in tests, a canned or failing source.
pub trait InventorySource {
    fn load_inventory(&self) -> impl Future<Output = DbResult<Vec<InventoryItem>>> + Send;
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Lists every product, ascending by `itemID`.
    pub async fn list_all(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT itemID, itemName, itemQuantity FROM products ORDER BY itemID",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Loaded inventory");
        Ok(items)
    }

    /// Gets a product by its `itemID`.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, item_id: i64) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            "SELECT itemID, itemName, itemQuantity FROM products WHERE itemID = ?1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a product row.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - `itemID` already exists
    pub async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(item_id = item.item_id, name = %item.item_name, "Inserting product");

        sqlx::query("INSERT INTO products (itemID, itemName, itemQuantity) VALUES (?1, ?2, ?3)")
            .bind(item.item_id)
            .bind(&item.item_name)
            .bind(item.item_quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                    field,
                    value: item.item_id.to_string(),
                },
                other => other,
            })?;

        Ok(())
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl InventorySource for InventoryRepository {
    async fn load_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        self.list_all().await
    }
}
