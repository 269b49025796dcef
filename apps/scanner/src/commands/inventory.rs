//! # Inventory Commands
//!
//! Loads the product list for the inventory tab.
//!
//! ## Load Behavior
//! ```text
//! tab mounted ──► InventoryView::Loading ──► load_inventory() ──► Loaded(items)
//!                                                  │
//!                                        query fails: error! log,
//!                                        Loaded(vec![]) ("No products found")
//! ```
//!
//! The view is re-queried on every mount; nothing is cached between visits.
//!
//! The one-shot `stockscan inventory` command uses [`list_inventory`] and
//! [`get_inventory_item`] instead, which report database errors so the
//! process exits non-zero.

use stockscan_core::{InventoryItem, InventoryView};
use stockscan_db::{DbError, InventoryRepository, InventorySource};
use tracing::{debug, error};

use crate::error::ApiError;

/// Queries all products, ordered by id.
///
/// Never fails: a broken database shows up as an empty list.
pub async fn load_inventory<S: InventorySource>(source: &S) -> InventoryView {
    debug!("load_inventory command");

    match source.load_inventory().await {
        Ok(items) => {
            debug!(count = items.len(), "Inventory loaded");
            InventoryView::Loaded(items)
        }
        Err(e) => {
            error!(error = %e, "Failed to load inventory");
            InventoryView::Loaded(Vec::new())
        }
    }
}

/// Lists all products, failing on database errors.
pub async fn list_inventory(repo: &InventoryRepository) -> Result<Vec<InventoryItem>, ApiError> {
    debug!("list_inventory command");
    Ok(repo.list_all().await?)
}

/// Looks up one product by `itemID`.
pub async fn get_inventory_item(
    repo: &InventoryRepository,
    item_id: i64,
) -> Result<InventoryItem, ApiError> {
    debug!(item_id, "get_inventory_item command");

    repo.get_by_id(item_id)
        .await?
        .ok_or_else(|| DbError::not_found("Product", item_id).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockscan_db::{Database, DbConfig, DbResult};

    struct Broken;

    impl InventorySource for Broken {
        async fn load_inventory(&self) -> DbResult<Vec<InventoryItem>> {
            Err(DbError::QueryFailed("no such table: products".into()))
        }
    }

    #[tokio::test]
    async fn test_loads_rows_in_id_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&InventoryItem::new(2, "Bread", 0)).await.unwrap();
        repo.insert(&InventoryItem::new(1, "Apple", 10)).await.unwrap();

        let view = load_inventory(&repo).await;
        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id_label, "ID: 1");
        assert_eq!(rows[0].name, "Apple");
        assert_eq!(rows[1].quantity_label, "Qty: 0");
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_list() {
        let view = load_inventory(&Broken).await;
        assert!(!view.is_loading());
        assert!(view.items().is_empty());
    }

    #[tokio::test]
    async fn test_get_item_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&InventoryItem::new(5, "Eggs", 12)).await.unwrap();

        let item = get_inventory_item(&repo, 5).await.unwrap();
        assert_eq!(item, InventoryItem::new(5, "Eggs", 12));

        let err = get_inventory_item(&repo, 6).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 6");
    }

    #[tokio::test]
    async fn test_list_reports_database_errors() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let err = list_inventory(&db.inventory()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[tokio::test]
    async fn test_list_returns_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&InventoryItem::new(1, "Apple", 10)).await.unwrap();

        let items = list_inventory(&repo).await.unwrap();
        assert_eq!(items, vec![InventoryItem::new(1, "Apple", 10)]);
    }
}
