//! # Inventory View Model
//!
//! The inventory tab: one read-only list of products, loaded each time the
//! tab is mounted.
//!
//! ## View States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Tab                                        │
//! │                                                                         │
//! │  mount ──► Loading ("Loading inventory...")                            │
//! │               │                                                         │
//! │               ├── query ok ─────► Loaded(items)                         │
//! │               │                                                         │
//! │               └── query failed ─► Loaded([])  (error logged only)       │
//! │                                                                         │
//! │  Loaded([]) renders "No products found"                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows keep the order they were loaded in; the query already sorts by
//! `itemID`. A quantity of zero is shown as `Qty: 0`, not hidden.

use serde::{Deserialize, Serialize};

/// A product row from the inventory database.
///
/// The serialized field names follow the `products` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    #[serde(rename = "itemID")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "itemID"))]
    pub item_id: i64,

    #[serde(rename = "itemName")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "itemName"))]
    pub item_name: String,

    #[serde(rename = "itemQuantity")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "itemQuantity"))]
    pub item_quantity: i64,
}

impl InventoryItem {
    pub fn new(item_id: i64, item_name: impl Into<String>, item_quantity: i64) -> Self {
        InventoryItem {
            item_id,
            item_name: item_name.into(),
            item_quantity,
        }
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    /// List key.
    pub key: String,
    pub id_label: String,
    pub name: String,
    pub quantity_label: String,
}

impl From<&InventoryItem> for InventoryRow {
    fn from(item: &InventoryItem) -> Self {
        InventoryRow {
            key: item.item_id.to_string(),
            id_label: format!("ID: {}", item.item_id),
            name: item.item_name.clone(),
            quantity_label: format!("Qty: {}", item.item_quantity),
        }
    }
}

/// State of the inventory tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "items")]
pub enum InventoryView {
    #[default]
    Loading,
    Loaded(Vec<InventoryItem>),
}

impl InventoryView {
    pub const TITLE: &'static str = "Inventory";
    pub const LOADING_MESSAGE: &'static str = "Loading inventory...";
    pub const EMPTY_MESSAGE: &'static str = "No products found";

    pub fn is_loading(&self) -> bool {
        matches!(self, InventoryView::Loading)
    }

    /// Loaded items, empty while loading.
    pub fn items(&self) -> &[InventoryItem] {
        match self {
            InventoryView::Loading => &[],
            InventoryView::Loaded(items) => items,
        }
    }

    /// Rows in load order.
    pub fn rows(&self) -> Vec<InventoryRow> {
        self.items().iter().map(InventoryRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_order_and_show_zero() {
        let view = InventoryView::Loaded(vec![
            InventoryItem::new(1, "Apple", 10),
            InventoryItem::new(2, "Bread", 0),
        ]);

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id_label, "ID: 1");
        assert_eq!(rows[0].name, "Apple");
        assert_eq!(rows[0].quantity_label, "Qty: 10");
        assert_eq!(rows[1].key, "2");
        assert_eq!(rows[1].name, "Bread");
        assert_eq!(rows[1].quantity_label, "Qty: 0");
    }

    #[test]
    fn test_loading_has_no_rows() {
        let view = InventoryView::default();
        assert!(view.is_loading());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_item_serializes_column_names() {
        let json = serde_json::to_value(InventoryItem::new(7, "Milk", 3)).unwrap();
        assert_eq!(json["itemID"], 7);
        assert_eq!(json["itemName"], "Milk");
        assert_eq!(json["itemQuantity"], 3);
    }
}
