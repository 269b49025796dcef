//! # Validation Module
//!
//! Input checks applied before device or config input reaches the scan flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Capture device adapter                                       │
//! │  ├── Symbology parsing (ean13, upc_a, code128, qr)                     │
//! │  └── THIS MODULE: enabled symbology, non-empty payload                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Scan flow controller                                         │
//! │  └── Screen preconditions (ignored, never errors)                      │
//! │                                                                         │
//! │  Label fields are NOT validated anywhere: the draft stores text         │
//! │  verbatim, including the price.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{BarcodeSymbology, CaptureEvent};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest payload a QR code can carry (alphanumeric mode, version 40).
pub const MAX_BARCODE_DATA_LEN: usize = 4296;

/// Builds a capture event from raw device output.
///
/// ## Rules
/// - `raw_type` must name a known symbology that is in `enabled`
/// - `data` must not be empty and at most [`MAX_BARCODE_DATA_LEN`] bytes
/// - `data` is otherwise kept verbatim (no trimming)
///
/// ## Example
/// ```rust
/// use stockscan_core::validation::validate_capture;
/// use stockscan_core::BarcodeSymbology;
///
/// let enabled = BarcodeSymbology::ALL;
/// assert!(validate_capture("ean13", "0123456789012", &enabled).is_ok());
/// assert!(validate_capture("ean13", "", &enabled).is_err());
/// assert!(validate_capture("qr", "x", &[BarcodeSymbology::Ean13]).is_err());
/// ```
pub fn validate_capture(
    raw_type: &str,
    data: &str,
    enabled: &[BarcodeSymbology],
) -> CoreResult<CaptureEvent> {
    let symbology: BarcodeSymbology = raw_type.parse()?;

    if !enabled.contains(&symbology) {
        return Err(CoreError::SymbologyNotEnabled(symbology.to_string()));
    }

    if data.is_empty() {
        return Err(CoreError::EmptyCapture);
    }

    if data.len() > MAX_BARCODE_DATA_LEN {
        return Err(ValidationError::TooLong {
            field: "data".to_string(),
            max: MAX_BARCODE_DATA_LEN,
        }
        .into());
    }

    Ok(CaptureEvent::new(symbology, data))
}

/// Parses a list of symbology names into the set the device should decode.
///
/// ## Rules
/// - At least one entry
/// - Every entry must be a known symbology
/// - Duplicates are dropped, first occurrence wins the position
pub fn parse_symbologies<I, S>(names: I) -> ValidationResult<Vec<BarcodeSymbology>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        let symbology: BarcodeSymbology = name.parse()?;
        if !parsed.contains(&symbology) {
            parsed.push(symbology);
        }
    }

    if parsed.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode_types".to_string(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_keeps_data_verbatim() {
        let event = validate_capture("code128", " A-1 ", &BarcodeSymbology::ALL).unwrap();
        assert_eq!(event.symbology, BarcodeSymbology::Code128);
        assert_eq!(event.data, " A-1 ");
    }

    #[test]
    fn test_capture_rejects_disabled_symbology() {
        let err = validate_capture("qr", "hello", &[BarcodeSymbology::Ean13]).unwrap_err();
        assert!(matches!(err, CoreError::SymbologyNotEnabled(ref s) if s == "qr"));
    }

    #[test]
    fn test_capture_rejects_unknown_symbology() {
        let err = validate_capture("pdf417", "hello", &BarcodeSymbology::ALL).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::NotAllowed { .. })));
    }

    #[test]
    fn test_capture_rejects_empty_and_oversized() {
        assert!(matches!(
            validate_capture("qr", "", &BarcodeSymbology::ALL),
            Err(CoreError::EmptyCapture)
        ));

        let huge = "x".repeat(MAX_BARCODE_DATA_LEN + 1);
        assert!(matches!(
            validate_capture("qr", &huge, &BarcodeSymbology::ALL),
            Err(CoreError::Validation(ValidationError::TooLong { .. }))
        ));
    }

    #[test]
    fn test_parse_symbologies() {
        let parsed = parse_symbologies(["qr", "EAN13", "qr", " "]).unwrap();
        assert_eq!(parsed, vec![BarcodeSymbology::Qr, BarcodeSymbology::Ean13]);

        assert!(parse_symbologies(Vec::<String>::new()).is_err());
        assert!(parse_symbologies(["ean13", "bogus"]).is_err());
    }
}
