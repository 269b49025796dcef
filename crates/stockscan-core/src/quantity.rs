//! # Quantity Source
//!
//! Supplies the quantity shown on the review screen after a scan.
//!
//! There is no real lookup yet: which system owns "quantity by barcode"
//! has not been decided. [`MockQuantity`] stands in for it and derives a
//! stable number from the barcode itself, so the same barcode always shows
//! the same quantity during a demo.

use std::num::NonZeroU32;

/// Largest quantity the mock source hands out.
pub const MOCK_QUANTITY_MAX: u32 = 100;

/// Something that can tell how many units of a barcode are on hand.
pub trait QuantitySource {
    /// Returns the quantity for a scanned barcode. Never zero.
    fn quantity_for(&mut self, barcode: &str) -> NonZeroU32;
}

/// Deterministic placeholder: FNV-1a hash of the barcode, mapped into
/// `1..=MOCK_QUANTITY_MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockQuantity;

impl QuantitySource for MockQuantity {
    fn quantity_for(&mut self, barcode: &str) -> NonZeroU32 {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let hash = barcode.bytes().fold(FNV_OFFSET, |acc, byte| {
            (acc ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
        let quantity = (hash % u64::from(MOCK_QUANTITY_MAX)) as u32 + 1;
        NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN)
    }
}

/// Always returns the same quantity. Handy in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedQuantity(pub NonZeroU32);

impl QuantitySource for FixedQuantity {
    fn quantity_for(&mut self, _barcode: &str) -> NonZeroU32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_quantity_is_stable_and_in_range() {
        let mut source = MockQuantity;
        for barcode in ["0123456789012", "036000291452", "", "https://example.com"] {
            let first = source.quantity_for(barcode);
            assert_eq!(first, source.quantity_for(barcode));
            assert!(first.get() >= 1 && first.get() <= MOCK_QUANTITY_MAX);
        }
    }

    #[test]
    fn test_fixed_quantity() {
        let mut source = FixedQuantity(NonZeroU32::new(7).unwrap());
        assert_eq!(source.quantity_for("anything").get(), 7);
    }
}
