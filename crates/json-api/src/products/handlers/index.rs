//! Product Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use cakeshop_app::domain::products::{
    data::{Availability, PageSize, ProductListing, SortKey},
    records::{
        CategoryUuid, ConfectionerUuid, FlavorUuid, Pagination, ProductPage, ProductSummaryRecord,
        SizeUuid,
    },
};

use crate::{
    envelope::{Envelope, ok},
    errors::ApiError,
    extensions::*,
    money::{from_cents, parse_cents, validate_amount},
    products::errors::into_api_error,
    state::State,
};

/// Product listing query string.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ListProductsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    /// Unsupported sizes fall back to the default rather than failing.
    pub page_size: Option<String>,

    #[validate(custom(function = "validate_sort_by"))]
    pub sort_by: Option<String>,

    #[validate(custom(function = "validate_uuid_list"))]
    pub category_ids: Option<String>,

    #[validate(custom(function = "validate_uuid_list"))]
    pub flavor_ids: Option<String>,

    #[validate(custom(function = "validate_uuid_list"))]
    pub size_ids: Option<String>,

    #[validate(custom(function = "validate_uuid_list"))]
    pub confectioner_ids: Option<String>,

    #[validate(custom(function = "validate_amount"))]
    pub min_price: Option<String>,

    #[validate(custom(function = "validate_amount"))]
    pub max_price: Option<String>,

    #[validate(custom(function = "validate_availability"))]
    pub availability: Option<String>,

    #[validate(length(max = 100))]
    pub search_term: Option<String>,
}

impl ListProductsQuery {
    fn into_listing(self) -> ProductListing {
        ProductListing {
            page: self.page.unwrap_or(1),
            page_size: PageSize::from_requested(
                self.page_size
                    .as_deref()
                    .and_then(|size| size.trim().parse().ok()),
            ),
            sort: parse_or_default(self.sort_by.as_deref()),
            category_uuids: ids(self.category_ids.as_deref(), CategoryUuid::from_uuid),
            flavor_uuids: ids(self.flavor_ids.as_deref(), FlavorUuid::from_uuid),
            size_uuids: ids(self.size_ids.as_deref(), SizeUuid::from_uuid),
            confectioner_uuids: ids(self.confectioner_ids.as_deref(), ConfectionerUuid::from_uuid),
            min_price: self.min_price.as_deref().and_then(parse_cents),
            max_price: self.max_price.as_deref().and_then(parse_cents),
            availability: parse_or_default::<Availability>(self.availability.as_deref()),
            search_term: self.search_term,
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn split_ids(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|id| !id.is_empty())
}

fn ids<T>(value: Option<&str>, wrap: fn(Uuid) -> T) -> Vec<T> {
    value
        .into_iter()
        .flat_map(split_ids)
        .filter_map(|id| Uuid::parse_str(id).ok())
        .map(wrap)
        .collect()
}

fn invalid_option(message: String) -> ValidationError {
    ValidationError::new("invalidOption").with_message(message.into())
}

fn validate_sort_by(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SortKey>()
        .map(|_sort| ())
        .map_err(|error| invalid_option(error.to_string()))
}

fn validate_availability(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Availability>()
        .map(|_availability| ())
        .map_err(|error| invalid_option(error.to_string()))
}

fn validate_uuid_list(value: &str) -> Result<(), ValidationError> {
    match split_ids(value).find(|id| Uuid::parse_str(id).is_err()) {
        Some(id) => Err(ValidationError::new("uuidList")
            .with_message(format!("`{id}` is not a valid UUID").into())),
        None => Ok(()),
    }
}

/// Product as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub primary_image: Option<String>,

    /// Price to pay
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Base price while a promotion runs
    #[serde(with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    pub is_promotion: bool,
    pub rating: f64,
    pub review_count: u32,
    pub confectioner_name: Option<String>,
    pub available: bool,
    pub preparation_minutes: u32,
}

impl From<ProductSummaryRecord> for ProductSummaryResponse {
    fn from(product: ProductSummaryRecord) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            name: product.name,
            primary_image: product.primary_image,
            price: from_cents(product.pricing.effective_price()),
            original_price: product.pricing.original_price().map(from_cents),
            is_promotion: product.pricing.is_promoted(),
            rating: product.rating,
            review_count: product.review_count,
            confectioner_name: product.confectioner_name,
            available: product.available,
            preparation_minutes: product.preparation_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            total_items: pagination.total_items,
            total_pages: pagination.total_pages,
            current_page: pagination.current_page,
            page_size: pagination.page_size,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<ProductPage> for ProductsResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products.into_iter().map(Into::into).collect(),
            pagination: page.pagination.into(),
        }
    }
}

/// Product Index Handler
///
/// Returns one page of products matching the query filters.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_400()?;

    let query = req
        .parse_queries::<ListProductsQuery>()
        .map_err(|error| ApiError::malformed(&error))?;

    query.validate()?;

    let page = state
        .app
        .products
        .list_products(tenant, query.into_listing())
        .await
        .map_err(into_api_error)?;

    Ok(ok(page.into()))
}
