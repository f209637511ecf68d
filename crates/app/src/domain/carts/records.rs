//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::products::records::{FlavorUuid, ProductUuid, SizeUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub session_id: String,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of the line totals, in minor units.
    pub fn total(&self) -> u64 {
        self.items.iter().map(|item| item.total_price).sum()
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub flavor_uuid: FlavorUuid,
    pub size_uuid: SizeUuid,
    pub quantity: u8,

    /// Price per unit when the line was last added to, in minor units.
    pub unit_price: u64,

    /// `unit_price * quantity`
    pub total_price: u64,
    pub observations: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
