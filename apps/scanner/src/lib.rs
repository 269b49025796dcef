//! # StockScan Scanner Application
//!
//! Wires configuration, logging, the database and the tab shell together.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Scanner                                │
//! │                                                                         │
//! │  main.rs ────► parses the command line, calls run()                     │
//! │                                                                         │
//! │  lib.rs ─────► config, tracing, database path, dispatch                 │
//! │                                                                         │
//! │  shell.rs ───► tab bar, screens, line commands                          │
//! │                                                                         │
//! │  commands/ ──► capture_barcode, submit_label, load_inventory, ...       │
//! │                                                                         │
//! │  state/ ─────► DbState, ScanState, CameraState, AppConfig               │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  inventory.db (provisioned from Inventory.db, WAL mode)          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use stockscan_core::InventoryView;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

use stockscan_db::{Database, DbConfig};

pub use cli::{Cli, Command};
use commands::inventory::{get_inventory_item, list_inventory};
use error::{AppError, AppResult};
use shell::{render_inventory, Shell};
use state::config::DEFAULT_LOG_FILTER;
use state::{AppConfig, CameraState, DbState, ScanState, SimulatedCamera};

/// Handle for swapping the log filter after startup.
pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "inventory.db";

/// Runs the application.
///
/// ## Startup Sequence
/// 1. Initialize tracing with the default filter
/// 2. Load config (file, `STOCKSCAN_*`, command line), then apply its filter
/// 3. Determine the database path
/// 4. Provision, connect and migrate
/// 5. Run the shell or the one-shot inventory listing
pub async fn run(cli: Cli) -> AppResult<()> {
    let log_handle = init_tracing();

    let mut config = AppConfig::load(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    apply_log_filter(&log_handle, &config.logging.filter);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting StockScan");

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let mut db_config = DbConfig::new(db_path).run_migrations(config.database.run_migrations);
    if let Some(asset) = &config.database.asset {
        db_config = db_config.asset(asset);
    }
    let db = DbState::new(Database::new(db_config).await?);
    info!("Database ready");

    let result = dispatch(&cli, &config, &db).await;

    db.inner().close().await;
    info!("Shutdown complete");
    result
}

async fn dispatch(cli: &Cli, config: &AppConfig, db: &DbState) -> AppResult<()> {
    match cli.command.clone().unwrap_or_default() {
        Command::Shell => {
            let camera = CameraState::new(SimulatedCamera::from_settings(&config.scanner));
            let mut shell = Shell::new(db.inventory(), ScanState::new(), camera);
            shell
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
        Command::Inventory { json, id } => {
            let repo = db.inventory();
            let items = match id {
                Some(id) => vec![get_inventory_item(&repo, id).await?],
                None => list_inventory(&repo).await?,
            };
            let view = InventoryView::Loaded(items);
            let text = if json {
                format!("{}\n", serde_json::to_string_pretty(&view)?)
            } else {
                render_inventory(&view)
            };
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Installs the global subscriber with `RUST_LOG` or the default filter.
///
/// Runs before the config is read so config warnings are not lost.
fn init_tracing() -> LogHandle {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let (subscriber, handle) = log_subscriber(filter, std::io::stderr);
    subscriber.init();
    handle
}

/// Swaps in the configured filter. `RUST_LOG` wins when set.
fn apply_log_filter(handle: &LogHandle, filter: &str) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(filter)) {
        warn!(error = %e, filter, "Failed to apply configured log filter");
    }
}

/// Builds a fmt subscriber whose filter can be reloaded.
///
/// Output goes to `writer` (stderr in the binary) so it stays out of the
/// screens on stdout.
fn log_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockscan.stockscan/inventory.db`
/// - **Windows**: `%APPDATA%\stockscan\stockscan\data\inventory.db`
/// - **Linux**: `~/.local/share/stockscan/inventory.db`
///
/// A configured path (`--db`, `STOCKSCAN_DB_PATH`, `[database] path`)
/// takes precedence.
fn get_database_path(config: &AppConfig) -> AppResult<PathBuf> {
    if let Some(path) = &config.database.path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "stockscan", "stockscan").ok_or(AppError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_warnings_are_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let (subscriber, handle) =
            log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut config = AppConfig::default();
            config.apply_overrides(|key| {
                (key == "STOCKSCAN_BARCODE_TYPES").then(|| "qr,bogus".to_string())
            });

            handle.reload(EnvFilter::new("error")).unwrap();
            warn!("dropped by the reloaded filter");
        });

        let output = captured.contents();
        assert!(output.contains("Ignoring invalid barcode types"));
        assert!(!output.contains("dropped by the reloaded filter"));
    }

    #[test]
    fn test_configured_database_path_wins() {
        let mut config = AppConfig::default();
        config.database.path = Some(PathBuf::from("/srv/stock/inventory.db"));
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/srv/stock/inventory.db")
        );
    }
}
