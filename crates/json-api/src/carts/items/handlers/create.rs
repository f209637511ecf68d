//! Create Cart Item Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::Span;
use uuid::Uuid;
use validator::Validate;

use cakeshop_app::domain::{
    carts::{data::NewCartItem, records::CartItemRecord},
    products::records::{FlavorUuid, ProductUuid, SizeUuid},
};

use crate::{
    carts::{errors::into_api_error, session::validate_session_id},
    envelope::{Envelope, ok},
    errors::ApiError,
    extensions::*,
    money::from_cents,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AddCartItemRequest {
    #[validate(
        required,
        length(min = 1, max = 255),
        custom(function = "validate_session_id")
    )]
    pub session_id: Option<String>,

    #[validate(required)]
    pub id_product: Option<Uuid>,

    #[validate(required)]
    pub id_flavor: Option<Uuid>,

    #[validate(required)]
    pub id_size: Option<Uuid>,

    #[validate(required, range(min = 1, max = 10))]
    pub quantity: Option<i64>,

    #[validate(length(max = 200))]
    pub observations: Option<String>,
}

impl AddCartItemRequest {
    /// `None` when a required field is missing; run validation first.
    fn into_new_cart_item(self) -> Option<NewCartItem> {
        Some(NewCartItem {
            session_id: self.session_id?,
            product_uuid: ProductUuid::from_uuid(self.id_product?),
            flavor_uuid: FlavorUuid::from_uuid(self.id_flavor?),
            size_uuid: SizeUuid::from_uuid(self.id_size?),
            quantity: u8::try_from(self.quantity?).ok()?,
            observations: self.observations,
        })
    }
}

/// Cart Item Added Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemAddedResponse {
    pub id_cart_item: Uuid,
    pub id_cart: Uuid,

    /// Line quantity after merging
    pub quantity: u8,

    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl From<CartItemRecord> for CartItemAddedResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id_cart_item: item.uuid.into_uuid(),
            id_cart: item.cart_uuid.into_uuid(),
            quantity: item.quantity,
            unit_price: from_cents(item.unit_price),
            total_price: from_cents(item.total_price),
        }
    }
}

/// Create Cart Item Handler
///
/// Adds a product configuration to the session's cart, merging with an
/// identical line when one exists.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CartItemAddedResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_400()?;

    let request = req
        .parse_json::<AddCartItemRequest>()
        .await
        .map_err(|error| ApiError::malformed(&error))?;

    request.validate()?;

    let item = request
        .into_new_cart_item()
        .ok_or_else(|| ApiError::validation(Vec::new()))?;

    Span::current().record("product_uuid", tracing::field::display(item.product_uuid));

    let added = state
        .app
        .carts
        .add_item(tenant, item)
        .await
        .map_err(into_api_error)?;

    Span::current().record("cart_uuid", tracing::field::display(added.cart_uuid));

    res.status_code(StatusCode::CREATED);

    Ok(ok(added.into()))
}
