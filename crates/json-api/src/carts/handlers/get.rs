//! Get Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::Span;
use uuid::Uuid;
use validator::Validate;

use cakeshop_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{
    carts::{errors::into_api_error, session::validate_session_id},
    envelope::{Envelope, ok},
    errors::ApiError,
    extensions::*,
    money::from_cents,
    state::State,
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GetCartQuery {
    #[validate(
        required,
        length(min = 1, max = 255),
        custom(function = "validate_session_id")
    )]
    pub session_id: Option<String>,
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub id: Uuid,
    pub session_id: String,
    pub items: Vec<CartItemResponse>,

    /// Sum of the line totals
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let total = from_cents(cart.total());

        Self {
            id: cart.uuid.into_uuid(),
            session_id: cart.session_id,
            items: cart.items.into_iter().map(Into::into).collect(),
            total,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub id: Uuid,
    pub id_product: Uuid,
    pub id_flavor: Uuid,
    pub id_size: Uuid,
    pub quantity: u8,

    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub observations: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            id_product: item.product_uuid.into_uuid(),
            id_flavor: item.flavor_uuid.into_uuid(),
            id_size: item.size_uuid.into_uuid(),
            quantity: item.quantity,
            unit_price: from_cents(item.unit_price),
            total_price: from_cents(item.total_price),
            observations: item.observations,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Get Cart Handler
///
/// Returns the cart of a shopping session.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_400()?;

    let query = req
        .parse_queries::<GetCartQuery>()
        .map_err(|error| ApiError::malformed(&error))?;

    query.validate()?;

    let session_id = query.session_id.unwrap_or_default();

    let cart = state
        .app
        .carts
        .get_cart(tenant, session_id)
        .await
        .map_err(into_api_error)?;

    Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

    Ok(ok(cart.into()))
}
