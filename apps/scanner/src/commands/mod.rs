//! # Commands Module
//!
//! Everything the shell can ask the application to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── scan.rs        ◄─── Barcode capture, zoom, label form
//! ├── permission.rs  ◄─── Camera permission
//! └── inventory.rs   ◄─── Product list
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the scan flow
//! fn request_label_entry(scan: &ScanState<Q>) -> ScanResponse
//!
//! // Needs the scan flow and the camera
//! fn capture_barcode(scan: &ScanState<Q>, camera: &CameraState, ...) -> Result<ScanResponse, ApiError>
//!
//! // Needs any inventory source
//! async fn load_inventory<S: InventorySource>(source: &S) -> InventoryView
//! ```

pub mod inventory;
pub mod permission;
pub mod scan;
