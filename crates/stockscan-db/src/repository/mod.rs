//! # Repository Module
//!
//! Database repository implementations for StockScan.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Inventory tab (mount)                                                 │
//! │       │                                                                 │
//! │       │  source.load_inventory()     ← any InventorySource             │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, item_id)                                         │
//! │  ├── insert(&self, item)     (seed tool only)                          │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (products table)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod inventory;
