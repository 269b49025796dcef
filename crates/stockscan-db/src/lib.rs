//! # stockscan-db: Database Layer for StockScan
//!
//! This crate provides database access for StockScan.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Data Flow                              │
//! │                                                                         │
//! │  Inventory tab mount (load_inventory command)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockscan-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │(inventory.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InventoryRepo │    │ 001_inventory│  │   │
//! │  │   │ Provisioning  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/stockscan/inventory.db (copied from Inventory.db)  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`provision`] - First-launch copy of the bundled database
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockscan_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/inventory.db").asset("assets/Inventory.db");
//! let db = Database::new(config).await?;
//!
//! let items = db.inventory().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod provision;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use provision::Provisioned;

pub use repository::inventory::{InventoryRepository, InventorySource};
