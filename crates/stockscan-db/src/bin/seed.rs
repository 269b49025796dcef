//! # Seed Data Generator
//!
//! Populates the database with demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p stockscan-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockscan-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! Rows get sequential `itemID`s starting at 1. A few quantities are zero
//! on purpose so the inventory tab shows `Qty: 0`.

use clap::Parser;
use stockscan_core::InventoryItem;
use stockscan_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Demo products and their on-hand quantities.
const DEMO_ITEMS: &[(&str, i64)] = &[
    ("Apple", 10),
    ("Bread", 0),
    ("Whole Milk", 24),
    ("Eggs Dozen", 6),
    ("Cheddar Cheese", 3),
    ("Orange Juice", 0),
    ("Butter", 12),
    ("Greek Yogurt", 18),
    ("Coffee Beans", 5),
    ("Pasta", 40),
    ("Rice 1kg", 15),
    ("Tomato Sauce", 9),
];

#[derive(Parser, Debug)]
#[command(name = "seed", about = "StockScan seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./inventory_dev.db")]
    db: String,

    /// Number of demo products to insert (at most the built-in list)
    #[arg(short, long, default_value_t = DEMO_ITEMS.len())]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args = Args::parse();
    info!(db = %args.db, count = args.count, "Seeding inventory");

    let db = Database::new(DbConfig::new(&args.db)).await?;
    let repo = db.inventory();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let mut generated = 0;
    for (idx, (name, quantity)) in DEMO_ITEMS.iter().take(args.count).enumerate() {
        let item = InventoryItem::new(idx as i64 + 1, *name, *quantity);
        if let Err(e) = repo.insert(&item).await {
            warn!(item_id = item.item_id, error = %e, "Failed to insert product");
            continue;
        }
        generated += 1;
    }

    info!(generated, total = repo.count().await?, "Seed complete");
    db.close().await;
    Ok(())
}
