//! Get Product Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cakeshop_app::domain::products::records::{
    ConfectionerRecord, FlavorRecord, ProductDetails, ProductImageRecord, ProductRecord,
    ReviewRecord, SizeRecord,
};

use crate::{
    envelope::{Envelope, ok},
    errors::ApiError,
    extensions::*,
    money::from_cents,
    products::{errors::into_api_error, handlers::product_uuid},
    state::State,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub confectioner_id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub nutritional_info: Option<String>,

    /// Price to pay
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Base price while a promotion runs
    #[serde(with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    pub is_promotion: bool,

    /// Available for ordering and in stock
    pub available: bool,
    pub stock: u32,
    pub preparation_minutes: u32,
    pub rating: f64,
    pub review_count: u32,
    pub sales_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let available = product.is_purchasable();

        Self {
            id: product.uuid.into_uuid(),
            category_id: product.category_uuid.into_uuid(),
            confectioner_id: product.confectioner_uuid.into_uuid(),
            name: product.name,
            description: product.description,
            ingredients: product.ingredients,
            nutritional_info: product.nutritional_info,
            price: from_cents(product.pricing.effective_price()),
            original_price: product.pricing.original_price().map(from_cents),
            is_promotion: product.pricing.is_promoted(),
            available,
            stock: product.stock,
            preparation_minutes: product.preparation_minutes,
            rating: product.rating,
            review_count: product.review_count,
            sales_count: product.sales_count,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageResponse {
    pub id: Uuid,
    pub url: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub display_order: i32,
}

impl From<ProductImageRecord> for ImageResponse {
    fn from(image: ProductImageRecord) -> Self {
        Self {
            id: image.uuid.into_uuid(),
            url: image.url,
            alt_text: image.alt_text,
            is_primary: image.is_primary,
            display_order: image.display_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FlavorResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<FlavorRecord> for FlavorResponse {
    fn from(flavor: FlavorRecord) -> Self {
        Self {
            id: flavor.uuid.into_uuid(),
            name: flavor.name,
            description: flavor.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SizeResponse {
    pub id: Uuid,
    pub name: String,
    pub servings: u32,

    /// Added to the product price; may be negative
    #[serde(with = "rust_decimal::serde::float")]
    pub price_modifier: Decimal,
}

impl From<SizeRecord> for SizeResponse {
    fn from(size: SizeRecord) -> Self {
        Self {
            id: size.uuid.into_uuid(),
            name: size.name,
            servings: size.servings,
            price_modifier: from_cents(size.price_modifier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            id: review.uuid.into_uuid(),
            customer_name: review.customer_name,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfectionerResponse {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub rating: f64,
}

impl From<ConfectionerRecord> for ConfectionerResponse {
    fn from(confectioner: ConfectionerRecord) -> Self {
        Self {
            id: confectioner.uuid.into_uuid(),
            name: confectioner.name,
            bio: confectioner.bio,
            avatar_url: confectioner.avatar_url,
            city: confectioner.city,
            rating: confectioner.rating,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub images: Vec<ImageResponse>,
    pub flavors: Vec<FlavorResponse>,
    pub sizes: Vec<SizeResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub confectioner: Option<ConfectionerResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        Self {
            product: details.product.into(),
            images: details.images.into_iter().map(Into::into).collect(),
            flavors: details.flavors.into_iter().map(Into::into).collect(),
            sizes: details.sizes.into_iter().map(Into::into).collect(),
            reviews: details.reviews.into_iter().map(Into::into).collect(),
            confectioner: details.confectioner.map(Into::into),
        }
    }
}

/// Get Product Handler
///
/// Returns a product with its images, options, reviews and confectioner.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductDetailsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_400()?;
    let product = product_uuid(req)?;

    let details = state
        .app
        .products
        .get_product(tenant, product)
        .await
        .map_err(into_api_error)?;

    Ok(ok(details.into()))
}
