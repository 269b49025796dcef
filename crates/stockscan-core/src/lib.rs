//! # stockscan-core: Pure Scan Flow Logic for StockScan
//!
//! This crate is the **heart** of StockScan. It holds the scan flow state
//! machine and the view models of every screen, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Tab Shell (apps/scanner)                     │   │
//! │  │        Scan tab ──► Quantity ──► Label        Inventory tab      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockscan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ scan_flow │  │   zoom    │  │ inventory │  │ permission│  │   │
//! │  │   │ Controller│  │   Zoom    │  │   View    │  │ CameraGate│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CAMERA • PURE STATE                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockscan-db (Database Layer)                   │   │
//! │  │              SQLite inventory query, migrations                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`scan_flow`] - The scan / quantity / label state machine
//! - [`types`] - Capture events, sessions, label drafts, tabs
//! - [`zoom`] - Zoom level in 0.1 steps (integer backed)
//! - [`quantity`] - Quantity source seam and its placeholder
//! - [`permission`] - Camera permission gating
//! - [`inventory`] - Inventory rows and view states
//! - [`device`] - Capture device and notifier traits
//! - [`validation`] - Device and config input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockscan_core::{BarcodeSymbology, CaptureEvent, LabelField, ScanFlowController, ScreenState};
//!
//! let mut flow: ScanFlowController = ScanFlowController::default();
//! assert!(flow
//!     .on_barcode_captured(CaptureEvent::new(BarcodeSymbology::Ean13, "0123456789012"))
//!     .is_applied());
//! assert!(flow.on_request_label_entry().is_applied());
//! assert!(flow.on_label_field_changed(LabelField::Name, "Widget").is_applied());
//!
//! let confirmation = flow.on_label_submit().applied().unwrap();
//! assert_eq!(confirmation.barcode_value, "0123456789012");
//! assert_eq!(flow.screen(), ScreenState::Scanning);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod device;
pub mod error;
pub mod inventory;
pub mod permission;
pub mod quantity;
pub mod scan_flow;
pub mod types;
pub mod validation;
pub mod zoom;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use device::{CaptureDevice, Notifier};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryItem, InventoryRow, InventoryView};
pub use permission::{CameraGate, PermissionStatus};
pub use quantity::{FixedQuantity, MockQuantity, QuantitySource};
pub use scan_flow::{FlowSnapshot, Ignored, ScanFlowController, Transition};
pub use types::*;
pub use zoom::{Zoom, ZoomDirection};
