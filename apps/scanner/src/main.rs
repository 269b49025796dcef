//! # StockScan Entry Point
//!
//! ```bash
//! # Interactive shell with a bundled database
//! stockscan --asset assets/Inventory.db
//!
//! # One-shot listing
//! stockscan inventory --json
//! stockscan inventory --id 3
//! ```

use std::process::ExitCode;

use clap::Parser;
use stockscan_app::{run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "StockScan exited with an error");
            eprintln!("stockscan: {}", e);
            ExitCode::FAILURE
        }
    }
}
