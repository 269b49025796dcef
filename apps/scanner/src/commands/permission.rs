//! # Permission Commands
//!
//! Camera permission for the scan tab.

use stockscan_core::{CameraGate, CaptureDevice, PermissionStatus};
use tracing::debug;

use crate::state::CameraState;

/// Mounts the camera and reports what the scan tab should render.
///
/// The first call resolves the stored permission; until then the gate is
/// [`CameraGate::Blank`].
pub fn camera_gate(camera: &CameraState) -> CameraGate {
    camera.with_camera_mut(|c| {
        let status = c.load_permission();
        debug!(?status, "Camera permission loaded");
        c.gate()
    })
}

/// "Grant Permission" on the permission screen.
pub fn request_camera_permission(camera: &CameraState) -> PermissionStatus {
    debug!("request_camera_permission command");
    camera.with_camera_mut(|c| c.request_permission())
}
