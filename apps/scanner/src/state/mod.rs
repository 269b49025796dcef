//! # State Module
//!
//! Application state, split by concern like the command signatures that
//! use it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │  ScanState   │  │ CameraState  │  │ AppConfig  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Database    │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  database  │  │
//! │  │  (SQLite     │  │   ScanFlow   │  │   Simulated  │  │  scanner   │  │
//! │  │   pool)      │  │   Controller │  │   Camera     │  │  logging   │  │
//! │  │              │  │  >>          │  │  >>          │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • ScanState / CameraState: Arc<Mutex<T>> for exclusive access         │
//! │  • AppConfig: Read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod camera;
pub mod config;
mod db;
mod scan;

pub use camera::{CameraState, SimulatedCamera};
pub use config::AppConfig;
pub use db::DbState;
pub use scan::ScanState;
