//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Scanner App Startup                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path).asset(bundled) ← Configure pool settings          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── provision file from asset (first launch only)                │
//! │       ├── create pool                                                  │
//! │       └── run migrations                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐                        │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ ...                    │                           │
//! │  │  └─────┘ └─────┘                        │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.inventory().list_all()  ← handed explicitly to the inventory tab   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL mode is enabled so the seed tool can write while the app
//! reads the same file.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::provision::{provision_database, Provisioned};
use crate::repository::inventory::InventoryRepository;

/// Path SQLite treats as a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Bundled database copied to `database_path` on first launch.
    pub asset_path: Option<PathBuf>,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to maintain.
    pub min_connections: u32,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Idle timeout before closing connections.
    pub idle_timeout: Duration,

    /// Whether to run migrations on startup.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with sensible defaults.
    ///
    /// ## Default Values
    /// - `max_connections`: 4 (one reader per mounted view is plenty)
    /// - `min_connections`: 1
    /// - `connect_timeout`: 30 seconds
    /// - `idle_timeout`: 10 minutes
    /// - `run_migrations`: true
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: database_path.into(),
            asset_path: None,
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the bundled asset to provision from.
    pub fn asset(mut self, asset: impl Into<PathBuf>) -> Self {
        self.asset_path = Some(asset.into());
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            asset_path: None,
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    /// True for the private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Explicit Handle
/// The handle is created once at startup and passed to whatever needs it;
/// the inventory tab receives it as an argument when it mounts. Nothing
/// reaches for a global database.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens (and if needed provisions) the database.
    ///
    /// ## What This Does
    /// 1. Copies the bundled asset into place if the file doesn't exist yet
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::new("./inventory.db").asset("assets/Inventory.db");
    /// let db = Database::new(config).await?;
    /// ```
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        if !config.is_in_memory() {
            let provisioned =
                provision_database(&config.database_path, config.asset_path.as_deref())?;
            debug!(?provisioned, "Database file ready");
            if provisioned == Provisioned::Empty {
                info!("No database asset configured, starting with an empty inventory");
            }
        }

        // The path is handed over as-is, never parsed as a URL, so `%` and
        // `?` in file names stay literal
        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new().filename(&config.database_path)
        };

        let connect_options = base_options
            // Readers don't block writers, writers don't block readers
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Called automatically by `new()` if `run_migrations` is true.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns `(total, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the inventory repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let items = db.inventory().list_all().await?;
    /// ```
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.migration_status().await.unwrap(), (1, 1));
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .asset("/tmp/asset.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.asset_path, Some(PathBuf::from("/tmp/asset.db")));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_path_with_url_characters_is_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a%20b").join("inv?x=1.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.inventory()
            .insert(&stockscan_core::InventoryItem::new(1, "Apple", 10))
            .await
            .unwrap();
        db.close().await;

        assert!(path.exists());
        assert!(!dir.path().join("a b").exists());

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(reopened.inventory().count().await.unwrap(), 1);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
