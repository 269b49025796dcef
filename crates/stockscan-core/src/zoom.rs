//! # Zoom Module
//!
//! Provides the `Zoom` type for the camera zoom control.
//!
//! ## Why Integer Steps?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Adding 0.1 ten times in f32:                                           │
//! │    0.1 + 0.1 + ... = 1.0000001  ❌ past the upper bound                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Tenths                                           │
//! │    steps ∈ 0..=10, value = steps / 10                                   │
//! │    Ten "in" presses land exactly on 1.0, an eleventh is a no-op         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockscan_core::zoom::{Zoom, ZoomDirection};
//!
//! let mut zoom = Zoom::default();
//! assert_eq!(zoom.value(), 0.0);
//!
//! zoom.adjust(ZoomDirection::In);
//! assert_eq!(zoom.steps(), 1);
//!
//! // Out of range presses are ignored
//! let mut zoom = Zoom::MIN;
//! assert!(!zoom.adjust(ZoomDirection::Out));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of steps between 0.0 and 1.0.
pub const ZOOM_STEPS: u8 = 10;

// =============================================================================
// Zoom Direction
// =============================================================================

/// A press on one of the zoom buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

impl FromStr for ZoomDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" | "+" => Ok(ZoomDirection::In),
            "out" | "-" => Ok(ZoomDirection::Out),
            _ => Err(ValidationError::not_allowed("zoom direction", ["in", "out"])),
        }
    }
}

// =============================================================================
// Zoom Type
// =============================================================================

/// Camera zoom level in the closed interval [0, 1], stored as tenths.
///
/// ## Invariant
/// `steps <= ZOOM_STEPS` at all times. Constructors clamp; `adjust` refuses
/// to move past either bound.
///
/// Serializes as the device value (`0.3`), not the step count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f32", try_from = "f32")]
pub struct Zoom(u8);

impl Zoom {
    /// Widest view (no zoom).
    pub const MIN: Zoom = Zoom(0);

    /// Maximum zoom the device supports.
    pub const MAX: Zoom = Zoom(ZOOM_STEPS);

    /// Creates a zoom level from a number of 0.1 steps, clamped to the bounds.
    #[inline]
    pub const fn from_steps(steps: u8) -> Self {
        if steps > ZOOM_STEPS {
            Zoom(ZOOM_STEPS)
        } else {
            Zoom(steps)
        }
    }

    /// Returns the number of 0.1 steps.
    #[inline]
    pub const fn steps(&self) -> u8 {
        self.0
    }

    /// Returns the value handed to the capture device.
    #[inline]
    pub fn value(&self) -> f32 {
        f32::from(self.0) / f32::from(ZOOM_STEPS)
    }

    /// Moves one step in the given direction.
    ///
    /// Returns `false` (and leaves the level untouched) when already at the
    /// bound in that direction.
    pub fn adjust(&mut self, direction: ZoomDirection) -> bool {
        let next = match direction {
            ZoomDirection::In if self.0 < ZOOM_STEPS => self.0 + 1,
            ZoomDirection::Out if self.0 > 0 => self.0 - 1,
            _ => return false,
        };
        self.0 = next;
        true
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl From<Zoom> for f32 {
    fn from(zoom: Zoom) -> f32 {
        zoom.value()
    }
}

/// Rounds to the nearest tenth; values outside [0, 1] are rejected.
impl TryFrom<f32> for Zoom {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidFormat {
                field: "zoom".to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
        Ok(Zoom((value * f32::from(ZOOM_STEPS)).round() as u8))
    }
}
