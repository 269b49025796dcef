//! # Domain Types
//!
//! Core domain types used throughout StockScan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CaptureEvent   │   │   ScanSession   │   │   LabelDraft    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  symbology      │──►│  barcode_value  │──►│  name           │       │
//! │  │  data           │   │  quantity_mock  │   │  price (text)   │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ScreenState   │   │       Tab       │   │LabelConfirmation│       │
//! │  │  Scanning       │   │  Scan           │   │  name, price,   │       │
//! │  │  ReviewingQty   │   │  Home           │   │  barcode_value  │       │
//! │  │  EditingLabel   │   │  Inventory      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifetime
//! Everything here lives for one scan session at most. Nothing is persisted;
//! the session id exists only to correlate log lines.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// =============================================================================
// Barcode Symbology
// =============================================================================

/// Barcode formats the capture device is asked to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeSymbology {
    /// EAN-13 retail barcode.
    Ean13,
    /// UPC-A retail barcode (North America).
    UpcA,
    /// Code 128 (shipping labels, internal SKUs).
    Code128,
    /// QR code.
    Qr,
}

impl BarcodeSymbology {
    /// Every supported symbology, in the order the device is configured.
    pub const ALL: [BarcodeSymbology; 4] = [
        BarcodeSymbology::Ean13,
        BarcodeSymbology::UpcA,
        BarcodeSymbology::Code128,
        BarcodeSymbology::Qr,
    ];

    /// Returns the wire name reported by capture devices.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BarcodeSymbology::Ean13 => "ean13",
            BarcodeSymbology::UpcA => "upc_a",
            BarcodeSymbology::Code128 => "code128",
            BarcodeSymbology::Qr => "qr",
        }
    }
}

impl fmt::Display for BarcodeSymbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeSymbology {
    type Err = ValidationError;

    /// Parses a device symbology name (case-insensitive, `upca` accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ean13" => Ok(BarcodeSymbology::Ean13),
            "upc_a" | "upca" => Ok(BarcodeSymbology::UpcA),
            "code128" => Ok(BarcodeSymbology::Code128),
            "qr" => Ok(BarcodeSymbology::Qr),
            _ => Err(ValidationError::not_allowed(
                "barcode type",
                BarcodeSymbology::ALL.iter().map(|s| s.as_str()),
            )),
        }
    }
}

// =============================================================================
// Capture Event
// =============================================================================

/// A single decode result from the capture device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureEvent {
    /// Symbology the payload was decoded from.
    #[serde(rename = "type")]
    pub symbology: BarcodeSymbology,

    /// Decoded payload, verbatim.
    pub data: String,
}

impl CaptureEvent {
    pub fn new(symbology: BarcodeSymbology, data: impl Into<String>) -> Self {
        CaptureEvent {
            symbology,
            data: data.into(),
        }
    }
}

// =============================================================================
// Scan Session
// =============================================================================

/// The transient record of one scan-to-submission lifecycle.
///
/// Created by the controller when a barcode is captured and dropped when
/// the flow returns to the scan screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSession {
    /// In-memory id, used only for log correlation.
    pub id: Uuid,

    /// Symbology of the capture that opened this session.
    pub symbology: BarcodeSymbology,

    /// Decoded barcode payload.
    pub barcode_value: String,

    /// Placeholder quantity until a real lookup by barcode exists.
    pub quantity_mock: NonZeroU32,

    /// When the barcode was captured.
    pub captured_at: DateTime<Utc>,
}

impl ScanSession {
    /// Opens a session for a capture event.
    pub fn open(event: CaptureEvent, quantity_mock: NonZeroU32) -> Self {
        ScanSession {
            id: Uuid::new_v4(),
            symbology: event.symbology,
            barcode_value: event.data,
            quantity_mock,
            captured_at: Utc::now(),
        }
    }
}

// =============================================================================
// Label Draft
// =============================================================================

/// A field of the label form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelField {
    Name,
    Price,
}

impl FromStr for LabelField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(LabelField::Name),
            "price" => Ok(LabelField::Price),
            _ => Err(ValidationError::not_allowed("label field", ["name", "price"])),
        }
    }
}

/// Label form contents while the user is editing.
///
/// ## No Validation
/// The price is free text at this layer. `"9.99"`, `"9,99"` and `"abc"`
/// are all stored verbatim; the (simulated) printer just echoes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDraft {
    pub name: String,
    pub price: String,
}

impl LabelDraft {
    /// Replaces one field with the given value, verbatim.
    pub fn set(&mut self, field: LabelField, value: impl Into<String>) {
        match field {
            LabelField::Name => self.name = value.into(),
            LabelField::Price => self.price = value.into(),
        }
    }
}

// =============================================================================
// Screen State
// =============================================================================

/// Which scan screen is displayed. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    /// Camera preview, waiting for a barcode.
    #[default]
    Scanning,
    /// Showing the captured barcode and its quantity.
    ReviewingQuantity,
    /// Label form for the captured barcode.
    EditingLabel,
}

impl ScreenState {
    /// Short screen name used in logs and the shell prompt.
    pub const fn name(&self) -> &'static str {
        match self {
            ScreenState::Scanning => "scan",
            ScreenState::ReviewingQuantity => "quantity",
            ScreenState::EditingLabel => "label",
        }
    }
}

// =============================================================================
// Label Confirmation
// =============================================================================

/// Payload produced when a label is submitted.
///
/// There is no printer; the notification collaborator shows this to the
/// user as a dismissible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfirmation {
    pub name: String,
    pub price: String,
    pub barcode_value: String,
}

impl LabelConfirmation {
    /// Builds the message shown to the user.
    pub fn to_notification(&self) -> Notification {
        Notification {
            title: "Label Printed".to_string(),
            message: format!(
                "Name: {}\nPrice: {}\nBarcode: {}",
                self.name, self.price, self.barcode_value
            ),
        }
    }
}

/// A dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

// =============================================================================
// Tabs
// =============================================================================

/// Screens hosted by the tab navigation shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Scan,
    #[default]
    Home,
    Inventory,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Tab; 3] = [Tab::Scan, Tab::Home, Tab::Inventory];

    /// Title shown in the tab bar.
    pub const fn title(&self) -> &'static str {
        match self {
            Tab::Scan => "Scan",
            Tab::Home => "Home",
            Tab::Inventory => "Inventory",
        }
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Tab::Scan),
            "home" => Ok(Tab::Home),
            "inventory" => Ok(Tab::Inventory),
            _ => Err(ValidationError::not_allowed(
                "tab",
                ["scan", "home", "inventory"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbology_parse() {
        assert_eq!("ean13".parse::<BarcodeSymbology>().unwrap(), BarcodeSymbology::Ean13);
        assert_eq!("UPC_A".parse::<BarcodeSymbology>().unwrap(), BarcodeSymbology::UpcA);
        assert_eq!("upca".parse::<BarcodeSymbology>().unwrap(), BarcodeSymbology::UpcA);
        assert!("pdf417".parse::<BarcodeSymbology>().is_err());
    }

    #[test]
    fn test_symbology_serde_matches_wire_name() {
        for symbology in BarcodeSymbology::ALL {
            let json = serde_json::to_string(&symbology).unwrap();
            assert_eq!(json, format!("\"{}\"", symbology.as_str()));
        }
    }

    #[test]
    fn test_capture_event_serializes_type_key() {
        let event = CaptureEvent::new(BarcodeSymbology::Ean13, "0123456789012");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ean13");
        assert_eq!(json["data"], "0123456789012");
    }

    #[test]
    fn test_label_draft_stores_verbatim() {
        let mut draft = LabelDraft::default();
        draft.set(LabelField::Price, " 9,99 ");
        assert_eq!(draft.price, " 9,99 ");
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_confirmation_notification() {
        let confirmation = LabelConfirmation {
            name: "Widget".to_string(),
            price: "9.99".to_string(),
            barcode_value: "0123456789012".to_string(),
        };
        let notification = confirmation.to_notification();
        assert_eq!(notification.title, "Label Printed");
        assert_eq!(
            notification.message,
            "Name: Widget\nPrice: 9.99\nBarcode: 0123456789012"
        );

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["barcodeValue"], "0123456789012");
    }

    #[test]
    fn test_tab_order_and_titles() {
        let titles: Vec<_> = Tab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(titles, ["Scan", "Home", "Inventory"]);
        assert_eq!(Tab::default(), Tab::Home);
        assert_eq!("Inventory".parse::<Tab>().unwrap(), Tab::Inventory);
    }
}
