//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Command line (--db, --asset)                    highest             │
//! │  2. Environment variables (STOCKSCAN_*)                                 │
//! │  3. Config file                                                         │
//! │     --config <path>, or                                                 │
//! │     ~/.config/stockscan/stockscan.toml (Linux)                          │
//! │     ~/Library/Application Support/com.stockscan.stockscan/ (macOS)      │
//! │  4. Defaults (this file)                            lowest              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # stockscan.toml
//! [database]
//! path = "/var/lib/stockscan/inventory.db"
//! asset = "/usr/share/stockscan/Inventory.db"
//!
//! [scanner]
//! barcode_types = ["ean13", "qr"]
//!
//! [logging]
//! filter = "info,stockscan=trace"
//! ```
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stockscan_core::validation::parse_symbologies;
use stockscan_core::BarcodeSymbology;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "stockscan.toml";

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,stockscan=debug,sqlx=warn";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub scanner: ScannerSettings,
    pub logging: LoggingSettings,
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database file. `None` uses the platform data directory.
    pub path: Option<PathBuf>,

    /// Bundled database copied into place on first launch.
    pub asset: Option<PathBuf>,

    /// Apply embedded migrations on startup.
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            asset: None,
            run_migrations: true,
        }
    }
}

/// `[scanner]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    /// Symbologies the camera decodes.
    pub barcode_types: Vec<BarcodeSymbology>,

    /// Simulated camera answers permission requests with "denied".
    pub camera_denied: bool,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            barcode_types: BarcodeSymbology::ALL.to_vec(),
            camera_denied: false,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Applies `STOCKSCAN_*` overrides read through `var`.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("STOCKSCAN_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(asset) = var("STOCKSCAN_DB_ASSET") {
            self.database.asset = Some(PathBuf::from(asset));
        }

        if let Some(types) = var("STOCKSCAN_BARCODE_TYPES") {
            match parse_symbologies(types.split(',')) {
                Ok(parsed) => {
                    debug!(types = %types, "Overriding barcode types from environment");
                    self.scanner.barcode_types = parsed;
                }
                Err(e) => warn!(types = %types, error = %e, "Ignoring invalid barcode types"),
            }
        }

        if let Some(filter) = var("STOCKSCAN_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.scanner.barcode_types.is_empty() {
            return Err(AppError::InvalidConfig(
                "at least one barcode type must be enabled".to_string(),
            ));
        }

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::InvalidConfig(
                    "database path must not be empty".to_string(),
                ));
            }
        }

        if let Err(e) = EnvFilter::try_new(&self.logging.filter) {
            return Err(AppError::InvalidConfig(format!(
                "invalid log filter '{}': {}",
                self.logging.filter, e
            )));
        }

        Ok(())
    }

    /// Platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockscan", "stockscan")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
