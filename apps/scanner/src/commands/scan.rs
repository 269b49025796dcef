//! # Scan Commands
//!
//! Commands behind the scan tab: camera decodes and the buttons of the
//! quantity and label screens.
//!
//! ## Scan Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐ capture_barcode ┌──────────┐ request_label ┌──────────┐  │
//! │  │ Scanning │────────────────►│ Quantity │──────────────►│  Label   │  │
//! │  │          │                 │  review  │               │   form   │  │
//! │  └──────────┘◄────────────────└──────────┘◄──────────────└──────────┘  │
//! │       ▲          go_back                       go_back        │        │
//! │       │                                                       │        │
//! │       └─────────────────── submit_label ──────────────────────┘        │
//! │                            (notification)                              │
//! │                                                                         │
//! │  Camera scanning is switched off on capture and back on whenever the   │
//! │  flow returns to Scanning.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events that do not fit the current screen are not errors: the response
//! carries the snapshot unchanged plus the reason in `ignored`.

use serde::Serialize;
use stockscan_core::{
    CaptureDevice, FlowSnapshot, Ignored, LabelField, Notifier, QuantitySource,
    ScanFlowController, ScreenState, Transition, ZoomDirection,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CameraState, ScanState};

/// Scan flow state after a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub snapshot: FlowSnapshot,

    /// Set when the event was ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Ignored>,
}

impl ScanResponse {
    pub fn is_applied(&self) -> bool {
        self.ignored.is_none()
    }
}

/// Logs the outcome of one event and captures the resulting state.
fn respond<Q: QuantitySource>(
    flow: &ScanFlowController<Q>,
    event: &'static str,
    ignored: Option<Ignored>,
) -> ScanResponse {
    match ignored {
        None => debug!(
            event,
            screen = flow.screen().name(),
            session_id = ?flow.session().map(|s| s.id),
            "Scan flow transition"
        ),
        Some(reason) => debug!(event, ?reason, "Scan flow event ignored"),
    }

    ScanResponse {
        snapshot: flow.snapshot(),
        ignored,
    }
}

/// Gets the current scan flow state.
pub fn get_scan_view<Q: QuantitySource>(scan: &ScanState<Q>) -> ScanResponse {
    ScanResponse {
        snapshot: scan.snapshot(),
        ignored: None,
    }
}

/// Feeds a decoded barcode to the scan flow.
///
/// ## Errors
/// - camera permission not granted
/// - symbology not enabled, unknown or empty payload
///
/// A decode while scanning is disabled is dropped and reported as
/// [`Ignored::GateClosed`].
pub fn capture_barcode<Q: QuantitySource>(
    scan: &ScanState<Q>,
    camera: &CameraState,
    raw_type: &str,
    data: &str,
) -> Result<ScanResponse, ApiError> {
    debug!(raw_type, len = data.len(), "capture_barcode command");

    let Some(event) = camera.with_camera(|c| c.decode(raw_type, data))? else {
        return Ok(scan.with_flow(|flow| respond(flow, "capture", Some(Ignored::GateClosed))));
    };

    let response = scan.with_flow_mut(|flow| {
        let ignored = match flow.on_barcode_captured(event) {
            Transition::Applied(session) => {
                info!(
                    session_id = %session.id,
                    symbology = %session.symbology,
                    quantity = session.quantity_mock.get(),
                    "Barcode captured"
                );
                None
            }
            Transition::Ignored(reason) => Some(reason),
        };
        respond(flow, "capture", ignored)
    });

    if response.is_applied() {
        camera.with_camera_mut(|c| c.set_scanning(false));
    }

    Ok(response)
}

/// Steps the zoom and applies it to the camera.
pub fn adjust_zoom<Q: QuantitySource>(
    scan: &ScanState<Q>,
    camera: &CameraState,
    direction: ZoomDirection,
) -> ScanResponse {
    debug!(?direction, "adjust_zoom command");

    let (response, zoom) = scan.with_flow_mut(|flow| {
        let transition = flow.on_zoom_adjust(direction);
        let ignored = transition.ignored();
        (respond(flow, "zoom", ignored), transition.applied())
    });

    if let Some(zoom) = zoom {
        camera.with_camera_mut(|c| c.set_zoom(zoom));
    }

    response
}

/// "Create Label" on the quantity screen.
pub fn request_label_entry<Q: QuantitySource>(scan: &ScanState<Q>) -> ScanResponse {
    scan.with_flow_mut(|flow| {
        let ignored = flow.on_request_label_entry().ignored();
        respond(flow, "request_label", ignored)
    })
}

/// Updates one field of the label form.
pub fn set_label_field<Q: QuantitySource>(
    scan: &ScanState<Q>,
    field: LabelField,
    value: String,
) -> ScanResponse {
    scan.with_flow_mut(|flow| {
        let ignored = flow.on_label_field_changed(field, value).ignored();
        respond(flow, "label_field", ignored)
    })
}

/// Submits the label form: shows the confirmation and re-arms the camera.
pub fn submit_label<Q: QuantitySource, N: Notifier>(
    scan: &ScanState<Q>,
    camera: &CameraState,
    notifier: &N,
) -> ScanResponse {
    let (response, confirmation) = scan.with_flow_mut(|flow| {
        let transition = flow.on_label_submit();
        let ignored = transition.ignored();
        (respond(flow, "submit", ignored), transition.applied())
    });

    if let Some(confirmation) = confirmation {
        info!(barcode = %confirmation.barcode_value, "Label printed");
        notifier.notify(&confirmation.to_notification());
        camera.with_camera_mut(|c| c.set_scanning(true));
    }

    response
}

/// "Back" on the quantity or label screen.
pub fn go_back<Q: QuantitySource>(scan: &ScanState<Q>, camera: &CameraState) -> ScanResponse {
    let response = scan.with_flow_mut(|flow| {
        let ignored = flow.on_back().ignored();
        respond(flow, "back", ignored)
    });

    if response.is_applied() && response.snapshot.screen == ScreenState::Scanning {
        camera.with_camera_mut(|c| c.set_scanning(true));
    }

    response
}
