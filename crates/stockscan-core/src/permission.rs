//! # Camera Permission
//!
//! Decides what the scan tab shows before the camera is allowed to run.
//!
//! ```text
//! permission not loaded yet ──► Blank
//! undetermined / denied     ──► PermissionRequired ("Grant Permission")
//! granted                   ──► Camera
//! ```
//!
//! A denial is recoverable: the permission screen offers an explicit
//! re-request, and nothing else in the app is blocked by it.

use serde::{Deserialize, Serialize};

/// Camera permission as reported by the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// The user has not been asked yet.
    Undetermined,
    Granted,
    Denied,
}

/// What the scan tab renders for a given permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraGate {
    /// Permission state still loading: render nothing.
    Blank,
    /// Blocking message with a re-request action.
    PermissionRequired,
    /// Camera preview and the scan flow.
    Camera,
}

impl CameraGate {
    /// Message shown on the permission screen.
    pub const PERMISSION_MESSAGE: &'static str = "We need your permission to show the camera";

    /// Label of the re-request action.
    pub const GRANT_ACTION: &'static str = "Grant Permission";

    pub fn from_status(status: Option<PermissionStatus>) -> Self {
        match status {
            None => CameraGate::Blank,
            Some(PermissionStatus::Granted) => CameraGate::Camera,
            Some(PermissionStatus::Undetermined | PermissionStatus::Denied) => {
                CameraGate::PermissionRequired
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_from_status() {
        assert_eq!(CameraGate::from_status(None), CameraGate::Blank);
        assert_eq!(
            CameraGate::from_status(Some(PermissionStatus::Undetermined)),
            CameraGate::PermissionRequired
        );
        assert_eq!(
            CameraGate::from_status(Some(PermissionStatus::Denied)),
            CameraGate::PermissionRequired
        );
        assert_eq!(
            CameraGate::from_status(Some(PermissionStatus::Granted)),
            CameraGate::Camera
        );
    }
}
