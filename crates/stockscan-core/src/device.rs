//! # Collaborator Seams
//!
//! Traits for the pieces the scan flow talks to but does not own: the
//! capture device and the notification surface. The core never implements
//! them against real hardware; the scanner app provides a simulated camera
//! and a console notifier, tests provide recorders.

use crate::permission::PermissionStatus;
use crate::types::{BarcodeSymbology, Notification};
use crate::zoom::Zoom;

/// A camera that decodes barcodes.
pub trait CaptureDevice {
    /// Current permission state, `None` while it is still being loaded.
    fn permission(&self) -> Option<PermissionStatus>;

    /// Asks the user for camera access and returns the answer.
    fn request_permission(&mut self) -> PermissionStatus;

    /// Symbologies the device is configured to decode.
    fn symbologies(&self) -> &[BarcodeSymbology];

    /// Applies a zoom level.
    fn set_zoom(&mut self, zoom: Zoom);

    /// Enables or disables delivery of scan events.
    ///
    /// Disabled while the scan flow's gate is set, so that one physical
    /// scan cannot open a second session.
    fn set_scanning(&mut self, enabled: bool);
}

/// Shows dismissible messages to the user.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}
