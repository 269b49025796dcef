//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::state::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "stockscan", version, about = "Barcode scanning and inventory")]
pub struct Cli {
    /// Config file (default: platform config dir, stockscan.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Bundled database copied into place on first launch
    #[arg(long, global = true)]
    pub asset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Interactive tab shell (default)
    #[default]
    Shell,

    /// Print the inventory and exit
    Inventory {
        /// Print JSON instead of the list view
        #[arg(long)]
        json: bool,

        /// Show a single product by id
        #[arg(long)]
        id: Option<i64>,
    },
}

impl Cli {
    /// Command line flags win over file and environment.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(db) = &self.db {
            config.database.path = Some(db.clone());
        }
        if let Some(asset) = &self.asset {
            config.database.asset = Some(asset.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::parse_from(["stockscan"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::Shell);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "stockscan",
            "inventory",
            "--json",
            "--db",
            "/tmp/a.db",
            "--asset",
            "/opt/Inventory.db",
        ]);
        assert_eq!(cli.command, Some(Command::Inventory { json: true, id: None }));

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/a.db")));
        assert_eq!(
            config.database.asset,
            Some(PathBuf::from("/opt/Inventory.db"))
        );
    }

    #[test]
    fn test_inventory_by_id() {
        let cli = Cli::parse_from(["stockscan", "inventory", "--id", "7"]);
        assert_eq!(
            cli.command,
            Some(Command::Inventory {
                json: false,
                id: Some(7)
            })
        );
    }
}
