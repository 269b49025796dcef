//! # Scan Flow Controller
//!
//! Owns the state of one scanning station and decides which scan screen is
//! displayed.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Flow                                            │
//! │                                                                         │
//! │          barcode captured (gate open)                                   │
//! │  ┌──────────┐ ─────────────────────────► ┌───────────────────┐         │
//! │  │ Scanning │                            │ ReviewingQuantity │         │
//! │  │          │ ◄───────────────────────── │                   │         │
//! │  └──────────┘   back (session dropped)   └───────────────────┘         │
//! │       ▲                                     │            ▲              │
//! │       │                      request label  │            │ back         │
//! │       │                                     ▼            │ (session     │
//! │       │                                  ┌──────────────────┐  kept)    │
//! │       └───────────────────────────────── │   EditingLabel   │           │
//! │        submit (confirmation emitted,     └──────────────────┘           │
//! │                gate reopened)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ignored Events
//! Every operation has a precondition. An event that arrives in the wrong
//! state changes nothing and comes back as [`Transition::Ignored`] with the
//! reason, which callers log. It is never an error: the UI only produces
//! such events from controls that should have been disabled.
//!
//! ## The Gate
//! A capture device may fire several decode callbacks for one physical scan
//! before the screen changes. The `scanned` gate is set by the first one and
//! every later capture is ignored until the flow returns to `Scanning`.
//! Callers should also stop the device while [`ScanFlowController::accepts_scans`]
//! is false.

use serde::{Deserialize, Serialize};

use crate::quantity::{MockQuantity, QuantitySource};
use crate::types::{
    CaptureEvent, LabelConfirmation, LabelDraft, LabelField, ScanSession, ScreenState,
};
use crate::zoom::{Zoom, ZoomDirection};

// =============================================================================
// Transition Outcome
// =============================================================================

/// Why an event did not change the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum Ignored {
    /// A barcode was already captured for the current session.
    GateClosed,
    /// The event belongs to a different screen.
    WrongScreen {
        expected: ScreenState,
        actual: ScreenState,
    },
    /// No scan session is active.
    NoSession,
    /// Zoom is already at the bound in the requested direction.
    ZoomAtBound,
}

/// Outcome of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Transition<T = ()> {
    Applied(T),
    Ignored(Ignored),
}

impl<T> Transition<T> {
    /// True if the event changed the flow.
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    /// Returns the produced value, if the event was applied.
    pub fn applied(self) -> Option<T> {
        match self {
            Transition::Applied(value) => Some(value),
            Transition::Ignored(_) => None,
        }
    }

    /// Returns the reason, if the event was ignored.
    pub fn ignored(&self) -> Option<Ignored> {
        match self {
            Transition::Applied(_) => None,
            Transition::Ignored(reason) => Some(*reason),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only copy of the controller state, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub screen: ScreenState,
    pub session: Option<ScanSession>,
    pub draft: Option<LabelDraft>,
    pub scanned: bool,
    pub zoom: Zoom,
}

// =============================================================================
// Controller
// =============================================================================

/// The scan flow state machine.
///
/// ## Invariants
/// - `screen != Scanning` implies `session.is_some()`
/// - `draft.is_some()` exactly when `screen == EditingLabel`
/// - `scanned` is set from capture until the flow is back at `Scanning`
#[derive(Debug, Clone)]
pub struct ScanFlowController<Q = MockQuantity> {
    screen: ScreenState,
    session: Option<ScanSession>,
    draft: Option<LabelDraft>,
    scanned: bool,
    zoom: Zoom,
    quantities: Q,
}

impl Default for ScanFlowController<MockQuantity> {
    fn default() -> Self {
        ScanFlowController::new(MockQuantity)
    }
}

impl<Q: QuantitySource> ScanFlowController<Q> {
    /// Creates a controller on the scan screen, gate open, zoom at 0.
    pub fn new(quantities: Q) -> Self {
        ScanFlowController {
            screen: ScreenState::Scanning,
            session: None,
            draft: None,
            scanned: false,
            zoom: Zoom::MIN,
            quantities,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn session(&self) -> Option<&ScanSession> {
        self.session.as_ref()
    }

    pub fn draft(&self) -> Option<&LabelDraft> {
        self.draft.as_ref()
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// False while a captured barcode is being handled. The capture device
    /// must not deliver events in that window.
    pub fn accepts_scans(&self) -> bool {
        !self.scanned
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            screen: self.screen,
            session: self.session.clone(),
            draft: self.draft.clone(),
            scanned: self.scanned,
            zoom: self.zoom,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handles a decode result from the capture device.
    ///
    /// ## Behavior
    /// - Gate open: sets the gate, opens a session with the payload
    ///   verbatim and a quantity from the quantity source, shows the
    ///   quantity screen
    /// - Gate set: ignored, so a burst of callbacks for one physical scan
    ///   opens exactly one session
    pub fn on_barcode_captured(&mut self, event: CaptureEvent) -> Transition<&ScanSession> {
        if self.scanned {
            return Transition::Ignored(Ignored::GateClosed);
        }

        self.scanned = true;
        let quantity = self.quantities.quantity_for(&event.data);
        self.draft = None;
        self.screen = ScreenState::ReviewingQuantity;

        Transition::Applied(&*self.session.insert(ScanSession::open(event, quantity)))
    }

    /// Moves zoom one 0.1 step, clamped to [0, 1].
    pub fn on_zoom_adjust(&mut self, direction: ZoomDirection) -> Transition<Zoom> {
        if self.zoom.adjust(direction) {
            Transition::Applied(self.zoom)
        } else {
            Transition::Ignored(Ignored::ZoomAtBound)
        }
    }

    /// Opens the label form for the current session with an empty draft.
    pub fn on_request_label_entry(&mut self) -> Transition {
        if let Err(reason) = self.expect_screen(ScreenState::ReviewingQuantity) {
            return Transition::Ignored(reason);
        }
        if self.session.is_none() {
            return Transition::Ignored(Ignored::NoSession);
        }

        self.draft = Some(LabelDraft::default());
        self.screen = ScreenState::EditingLabel;
        Transition::Applied(())
    }

    /// Stores a form field verbatim. No validation, no trimming.
    pub fn on_label_field_changed(
        &mut self,
        field: LabelField,
        value: impl Into<String>,
    ) -> Transition {
        if let Err(reason) = self.expect_screen(ScreenState::EditingLabel) {
            return Transition::Ignored(reason);
        }

        self.draft
            .get_or_insert_with(LabelDraft::default)
            .set(field, value);
        Transition::Applied(())
    }

    /// Completes the session.
    ///
    /// ## Behavior
    /// Produces `{name, price, barcode_value}` for the notification
    /// collaborator, then resets everything: gate open, back on the scan
    /// screen, no draft, no session.
    pub fn on_label_submit(&mut self) -> Transition<LabelConfirmation> {
        if let Err(reason) = self.expect_screen(ScreenState::EditingLabel) {
            return Transition::Ignored(reason);
        }
        let Some(session) = self.session.take() else {
            return Transition::Ignored(Ignored::NoSession);
        };

        let draft = self.draft.take().unwrap_or_default();
        self.reset();

        Transition::Applied(LabelConfirmation {
            name: draft.name,
            price: draft.price,
            barcode_value: session.barcode_value,
        })
    }

    /// Abandons the session from the quantity screen, without confirmation.
    pub fn on_back_from_quantity(&mut self) -> Transition {
        if let Err(reason) = self.expect_screen(ScreenState::ReviewingQuantity) {
            return Transition::Ignored(reason);
        }

        self.reset();
        Transition::Applied(())
    }

    /// Leaves the label form. The session is kept, the draft is dropped.
    pub fn on_back_from_label(&mut self) -> Transition {
        if let Err(reason) = self.expect_screen(ScreenState::EditingLabel) {
            return Transition::Ignored(reason);
        }

        self.draft = None;
        self.screen = ScreenState::ReviewingQuantity;
        Transition::Applied(())
    }

    /// Dispatches a generic "back" press to whichever back action the
    /// current screen has.
    pub fn on_back(&mut self) -> Transition {
        match self.screen {
            ScreenState::ReviewingQuantity => self.on_back_from_quantity(),
            ScreenState::EditingLabel => self.on_back_from_label(),
            ScreenState::Scanning => Transition::Ignored(Ignored::NoSession),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn expect_screen(&self, expected: ScreenState) -> Result<(), Ignored> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(Ignored::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }

    /// Back to the scan screen with nothing in flight. Zoom is kept.
    fn reset(&mut self) {
        self.scanned = false;
        self.screen = ScreenState::Scanning;
        self.session = None;
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::FixedQuantity;
    use crate::types::BarcodeSymbology;
    use std::num::NonZeroU32;

    fn ean13(data: &str) -> CaptureEvent {
        CaptureEvent::new(BarcodeSymbology::Ean13, data)
    }

    fn controller() -> ScanFlowController<FixedQuantity> {
        ScanFlowController::new(FixedQuantity(NonZeroU32::new(12).unwrap()))
    }

    #[test]
    fn test_initial_state() {
        let flow: ScanFlowController = ScanFlowController::default();
        assert_eq!(flow.screen(), ScreenState::Scanning);
        assert!(flow.session().is_none());
        assert!(flow.draft().is_none());
        assert!(flow.accepts_scans());
        assert_eq!(flow.zoom(), Zoom::MIN);
    }

    #[test]
    fn test_full_label_scenario() {
        let mut flow: ScanFlowController = ScanFlowController::default();

        let session = flow
            .on_barcode_captured(ean13("0123456789012"))
            .applied()
            .cloned()
            .unwrap();
        assert_eq!(session.barcode_value, "0123456789012");
        assert_eq!(session.symbology, BarcodeSymbology::Ean13);
        assert!(session.quantity_mock.get() >= 1);
        assert_eq!(flow.screen(), ScreenState::ReviewingQuantity);
        assert!(!flow.accepts_scans());

        assert!(flow.on_request_label_entry().is_applied());
        assert_eq!(flow.screen(), ScreenState::EditingLabel);
        assert_eq!(flow.draft(), Some(&LabelDraft::default()));

        assert!(flow.on_label_field_changed(LabelField::Name, "Widget").is_applied());
        assert!(flow.on_label_field_changed(LabelField::Price, "9.99").is_applied());
        let draft = flow.draft().unwrap();
        assert_eq!(draft.name, "Widget");
        assert_eq!(draft.price, "9.99");

        let confirmation = flow.on_label_submit().applied().unwrap();
        assert_eq!(
            confirmation,
            LabelConfirmation {
                name: "Widget".to_string(),
                price: "9.99".to_string(),
                barcode_value: "0123456789012".to_string(),
            }
        );
        assert_eq!(flow.screen(), ScreenState::Scanning);
        assert!(flow.accepts_scans());
        assert!(flow.session().is_none());
        assert!(flow.draft().is_none());
    }

    #[test]
    fn test_burst_of_captures_opens_one_session() {
        let mut flow = controller();

        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        let first = flow.session().cloned().unwrap();

        for data in ["111", "111", "222"] {
            let outcome = flow.on_barcode_captured(ean13(data));
            assert_eq!(outcome.ignored(), Some(Ignored::GateClosed));
        }

        assert_eq!(flow.session(), Some(&first));
        assert_eq!(flow.screen(), ScreenState::ReviewingQuantity);
    }

    #[test]
    fn test_capture_after_submit_succeeds_immediately() {
        let mut flow = controller();
        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        assert!(flow.on_request_label_entry().is_applied());
        assert!(flow.on_label_submit().is_applied());

        let session = flow.on_barcode_captured(ean13("222")).applied().cloned();
        assert_eq!(session.unwrap().barcode_value, "222");
        assert_eq!(flow.screen(), ScreenState::ReviewingQuantity);
    }

    #[test]
    fn test_back_from_label_restores_session() {
        let mut flow = controller();
        assert!(flow.on_barcode_captured(ean13("0123456789012")).is_applied());
        let before = flow.session().cloned();

        assert!(flow.on_request_label_entry().is_applied());
        assert!(flow.on_label_field_changed(LabelField::Name, "Half typed").is_applied());
        assert!(flow.on_back_from_label().is_applied());

        assert_eq!(flow.screen(), ScreenState::ReviewingQuantity);
        assert_eq!(flow.session().cloned(), before);
        assert!(flow.draft().is_none());
        assert!(!flow.accepts_scans());

        // Re-entering starts from an empty draft
        assert!(flow.on_request_label_entry().is_applied());
        assert_eq!(flow.draft(), Some(&LabelDraft::default()));
    }

    #[test]
    fn test_back_from_quantity_discards_session() {
        let mut flow = controller();
        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        assert!(flow.on_back_from_quantity().is_applied());

        assert_eq!(flow.screen(), ScreenState::Scanning);
        assert!(flow.session().is_none());
        assert!(flow.accepts_scans());
    }

    #[test]
    fn test_generic_back_dispatches_per_screen() {
        let mut flow = controller();
        assert_eq!(flow.on_back().ignored(), Some(Ignored::NoSession));

        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        assert!(flow.on_request_label_entry().is_applied());
        assert!(flow.on_back().is_applied());
        assert_eq!(flow.screen(), ScreenState::ReviewingQuantity);
        assert!(flow.on_back().is_applied());
        assert_eq!(flow.screen(), ScreenState::Scanning);
    }

    #[test]
    fn test_precondition_violations_are_no_ops() {
        let mut flow = controller();
        let initial = flow.snapshot();

        assert_eq!(
            flow.on_request_label_entry().ignored(),
            Some(Ignored::WrongScreen {
                expected: ScreenState::ReviewingQuantity,
                actual: ScreenState::Scanning,
            })
        );
        assert!(!flow.on_label_field_changed(LabelField::Name, "x").is_applied());
        assert!(!flow.on_label_submit().is_applied());
        assert!(!flow.on_back_from_quantity().is_applied());
        assert!(!flow.on_back_from_label().is_applied());
        assert_eq!(flow.snapshot(), initial);

        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        let reviewing = flow.snapshot();
        assert!(!flow.on_label_field_changed(LabelField::Price, "1").is_applied());
        assert!(!flow.on_label_submit().is_applied());
        assert!(!flow.on_back_from_label().is_applied());
        assert_eq!(flow.snapshot(), reviewing);

        assert!(flow.on_request_label_entry().is_applied());
        let editing = flow.snapshot();
        assert!(!flow.on_request_label_entry().is_applied());
        assert!(!flow.on_back_from_quantity().is_applied());
        assert_eq!(flow.snapshot(), editing);
    }

    #[test]
    fn test_zoom_is_clamped_and_survives_sessions() {
        let mut flow = controller();
        for _ in 0..15 {
            let _ = flow.on_zoom_adjust(ZoomDirection::In);
        }
        assert_eq!(flow.zoom(), Zoom::MAX);
        assert_eq!(
            flow.on_zoom_adjust(ZoomDirection::In).ignored(),
            Some(Ignored::ZoomAtBound)
        );

        assert_eq!(
            flow.on_zoom_adjust(ZoomDirection::Out).applied(),
            Some(Zoom::from_steps(9))
        );

        assert!(flow.on_barcode_captured(ean13("111")).is_applied());
        assert!(flow.on_back_from_quantity().is_applied());
        assert_eq!(flow.zoom(), Zoom::from_steps(9));
    }

    #[test]
    fn test_quantity_comes_from_source() {
        let mut flow = controller();
        let session = flow.on_barcode_captured(ean13("111")).applied().cloned();
        assert_eq!(session.unwrap().quantity_mock.get(), 12);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut flow = controller();
        assert!(flow.on_barcode_captured(ean13("111")).is_applied());

        let json = serde_json::to_value(flow.snapshot()).unwrap();
        assert_eq!(json["screen"], "reviewing_quantity");
        assert_eq!(json["session"]["barcodeValue"], "111");
        assert_eq!(json["session"]["quantityMock"], 12);
        assert_eq!(json["scanned"], true);
    }

    #[test]
    fn test_snapshot_zoom_is_device_value() {
        let mut flow = controller();
        for _ in 0..3 {
            assert!(flow.on_zoom_adjust(ZoomDirection::In).is_applied());
        }

        let text = serde_json::to_string(&flow.snapshot()).unwrap();
        assert!(text.contains("\"zoom\":0.3"), "{}", text);
    }
}
