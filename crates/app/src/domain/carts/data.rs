//! Cart Data

use std::ops::RangeInclusive;

use crate::domain::products::records::{FlavorUuid, ProductUuid, SizeUuid};

/// Quantities a single cart line may hold.
pub const ITEM_QUANTITY_RANGE: RangeInclusive<u8> = 1..=10;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    /// Anonymous shopper session owning the cart.
    pub session_id: String,
    pub product_uuid: ProductUuid,
    pub flavor_uuid: FlavorUuid,
    pub size_uuid: SizeUuid,
    pub quantity: u8,
    pub observations: Option<String>,
}

/// Unit price of a product in a size: effective price plus the size modifier.
///
/// Returns `None` when the modifier would make the price negative.
pub fn unit_price(effective_price: u64, size_price_modifier: i64) -> Option<u64> {
    effective_price.checked_add_signed(size_price_modifier)
}

pub fn line_total(unit_price: u64, quantity: u8) -> Option<u64> {
    unit_price.checked_mul(u64::from(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_adds_size_modifier() {
        assert_eq!(unit_price(2000, 500), Some(2500));
        assert_eq!(line_total(2500, 2), Some(5000));
    }

    #[test]
    fn unit_price_applies_discounting_modifier() {
        assert_eq!(unit_price(2000, -250), Some(1750));
    }

    #[test]
    fn unit_price_rejects_negative_result() {
        assert_eq!(unit_price(200, -500), None);
    }

    #[test]
    fn quantity_range_is_one_to_ten() {
        assert!(!ITEM_QUANTITY_RANGE.contains(&0));
        assert!(ITEM_QUANTITY_RANGE.contains(&1));
        assert!(ITEM_QUANTITY_RANGE.contains(&10));
        assert!(!ITEM_QUANTITY_RANGE.contains(&11));
    }
}
