//! Amounts travel as decimals (`25.00`) over HTTP and as cents everywhere else.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use validator::ValidationError;

const SCALE: u32 = 2;

/// Decimal amount for a value held in cents.
pub(crate) fn from_cents(cents: impl Into<i128>) -> Decimal {
    Decimal::from_i128_with_scale(cents.into(), SCALE)
}

/// Cents for a non-negative decimal amount with at most two fractional digits.
pub(crate) fn parse_cents(value: &str) -> Option<u64> {
    let amount = value.trim().parse::<Decimal>().ok()?;

    if amount.is_sign_negative() || amount.normalize().scale() > SCALE {
        return None;
    }

    (amount * Decimal::ONE_HUNDRED).to_u64()
}

pub(crate) fn validate_amount(value: &str) -> Result<(), ValidationError> {
    match parse_cents(value) {
        Some(_cents) => Ok(()),
        None => Err(ValidationError::new("invalidPrice")
            .with_message(format!("`{value}` is not a valid amount").into())),
    }
}
