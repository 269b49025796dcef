//! # Database Migrations
//!
//! Embedded SQL migrations for StockScan.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (created if missing)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 001_inventory.sql   (products table, IF NOT EXISTS)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record in _sqlx_migrations           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Asset Databases
//! A database copied from the bundled asset usually has the `products`
//! table but no `_sqlx_migrations` table. The first migration uses
//! `IF NOT EXISTS`, so it is recorded as applied without touching the data.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // No bookkeeping table yet means nothing has been applied
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
