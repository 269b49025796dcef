//! # Camera State
//!
//! A simulated barcode camera and the state wrapper that shares it.
//!
//! The camera has no hardware behind it: "decoding" a barcode means the
//! shell hands it a symbology name and a payload. Everything else behaves
//! like the real device contract in [`CaptureDevice`]:
//!
//! - permission starts unloaded and resolves on first mount of the scan tab
//! - only the configured symbologies are decoded
//! - while scanning is disabled, decodes are dropped
//! - zoom is applied as the controller reports it

use std::sync::{Arc, Mutex, PoisonError};

use stockscan_core::validation::validate_capture;
use stockscan_core::{
    BarcodeSymbology, CameraGate, CaptureDevice, CaptureEvent, PermissionStatus, Zoom,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::config::ScannerSettings;

/// A camera driven by text input.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    permission: Option<PermissionStatus>,
    deny_requests: bool,
    symbologies: Vec<BarcodeSymbology>,
    zoom: Zoom,
    scanning: bool,
}

impl SimulatedCamera {
    /// Creates a camera whose permission has not been loaded yet.
    pub fn new(symbologies: Vec<BarcodeSymbology>, deny_requests: bool) -> Self {
        SimulatedCamera {
            permission: None,
            deny_requests,
            symbologies,
            zoom: Zoom::MIN,
            scanning: true,
        }
    }

    pub fn from_settings(settings: &ScannerSettings) -> Self {
        Self::new(settings.barcode_types.clone(), settings.camera_denied)
    }

    /// Resolves the stored permission. The user has never been asked on a
    /// fresh camera.
    pub fn load_permission(&mut self) -> PermissionStatus {
        *self.permission.get_or_insert(PermissionStatus::Undetermined)
    }

    pub fn gate(&self) -> CameraGate {
        CameraGate::from_status(self.permission)
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Decodes one barcode.
    ///
    /// Returns `Ok(None)` when scanning is disabled: the decode happened
    /// but no event is delivered.
    pub fn decode(&self, raw_type: &str, data: &str) -> Result<Option<CaptureEvent>, ApiError> {
        if self.gate() != CameraGate::Camera {
            return Err(ApiError::permission_denied());
        }

        let event = validate_capture(raw_type, data, &self.symbologies)?;

        if !self.scanning {
            debug!(symbology = %event.symbology, "Scanning disabled, decode dropped");
            return Ok(None);
        }

        Ok(Some(event))
    }
}

impl CaptureDevice for SimulatedCamera {
    fn permission(&self) -> Option<PermissionStatus> {
        self.permission
    }

    fn request_permission(&mut self) -> PermissionStatus {
        let status = if self.deny_requests {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        };
        info!(?status, "Camera permission requested");
        self.permission = Some(status);
        status
    }

    fn symbologies(&self) -> &[BarcodeSymbology] {
        &self.symbologies
    }

    fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    fn set_scanning(&mut self, enabled: bool) {
        self.scanning = enabled;
    }
}

/// Shared handle to the camera.
#[derive(Debug, Clone)]
pub struct CameraState {
    camera: Arc<Mutex<SimulatedCamera>>,
}

impl CameraState {
    pub fn new(camera: SimulatedCamera) -> Self {
        CameraState {
            camera: Arc::new(Mutex::new(camera)),
        }
    }

    /// Executes a function with read access to the camera.
    pub fn with_camera<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SimulatedCamera) -> R,
    {
        let camera = self.camera.lock().unwrap_or_else(PoisonError::into_inner);
        f(&camera)
    }

    /// Executes a function with write access to the camera.
    pub fn with_camera_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SimulatedCamera) -> R,
    {
        let mut camera = self.camera.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut camera)
    }
}
