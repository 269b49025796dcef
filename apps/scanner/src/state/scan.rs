//! # Scan State
//!
//! Owns the scan flow controller for the lifetime of the scan tab.
//!
//! ## Thread Safety
//! The controller is wrapped in `Arc<Mutex<T>>`: capture events from the
//! camera and button presses from the user both mutate it, and exactly
//! one of them may do so at a time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User / Camera            Command                 Controller Change     │
//! │  ─────────────            ───────                 ─────────────────     │
//! │  barcode decoded ───────► capture_barcode() ────► on_barcode_captured   │
//! │  [-] / [+] ─────────────► adjust_zoom() ────────► on_zoom_adjust        │
//! │  "Create Label" ────────► request_label_entry() ► on_request_label_entry│
//! │  typing ────────────────► set_label_field() ────► on_label_field_changed│
//! │  "Submit" ──────────────► submit_label() ───────► on_label_submit       │
//! │  "Back" ────────────────► go_back() ────────────► on_back               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use stockscan_core::{FlowSnapshot, MockQuantity, QuantitySource, ScanFlowController};

/// Shared handle to the scan flow controller.
#[derive(Debug)]
pub struct ScanState<Q = MockQuantity> {
    flow: Arc<Mutex<ScanFlowController<Q>>>,
}

impl ScanState<MockQuantity> {
    /// Creates a scan state with the mock quantity source.
    pub fn new() -> Self {
        Self::with_quantities(MockQuantity)
    }
}

impl<Q: QuantitySource> ScanState<Q> {
    pub fn with_quantities(quantities: Q) -> Self {
        ScanState {
            flow: Arc::new(Mutex::new(ScanFlowController::new(quantities))),
        }
    }

    /// Executes a function with read access to the controller.
    pub fn with_flow<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ScanFlowController<Q>) -> R,
    {
        let flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        f(&flow)
    }

    /// Executes a function with write access to the controller.
    pub fn with_flow_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ScanFlowController<Q>) -> R,
    {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut flow)
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.with_flow(|flow| flow.snapshot())
    }
}

impl Default for ScanState<MockQuantity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> Clone for ScanState<Q> {
    fn clone(&self) -> Self {
        ScanState {
            flow: Arc::clone(&self.flow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use stockscan_core::{BarcodeSymbology, CaptureEvent, FixedQuantity, ScreenState};

    #[test]
    fn test_clones_share_controller() {
        let state = ScanState::with_quantities(FixedQuantity(NonZeroU32::new(3).unwrap()));
        let other = state.clone();

        let applied = state.with_flow_mut(|flow| {
            flow.on_barcode_captured(CaptureEvent::new(BarcodeSymbology::Ean13, "123"))
                .is_applied()
        });
        assert!(applied);

        let snapshot = other.snapshot();
        assert_eq!(snapshot.screen, ScreenState::ReviewingQuantity);
        assert_eq!(snapshot.session.unwrap().quantity_mock.get(), 3);
    }
}
