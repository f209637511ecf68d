//! Related Products Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use cakeshop_app::domain::products::data::{RelatedCriteria, RelatedQuery};

use crate::{
    envelope::{Envelope, ok},
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error,
        handlers::{index::ProductSummaryResponse, product_uuid},
    },
    state::State,
};

/// Both parameters are lenient: unusable values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RelatedProductsQuery {
    pub limit: Option<String>,
    pub criteria: Option<String>,
}

impl From<RelatedProductsQuery> for RelatedQuery {
    fn from(query: RelatedProductsQuery) -> Self {
        RelatedQuery::new(
            query.limit.as_deref().and_then(|limit| limit.trim().parse().ok()),
            RelatedCriteria::from_requested(query.criteria.as_deref()),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RelatedProductsResponse {
    pub products: Vec<ProductSummaryResponse>,
}

/// Related Products Handler
///
/// Returns purchasable products sharing the requested trait with a product.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<RelatedProductsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_400()?;
    let product = product_uuid(req)?;

    let query = req
        .parse_queries::<RelatedProductsQuery>()
        .map_err(|error| ApiError::malformed(&error))?;

    let related = state
        .app
        .products
        .related_products(tenant, product, query.into())
        .await
        .map_err(into_api_error)?;

    Ok(ok(RelatedProductsResponse {
        products: related.into_iter().map(Into::into).collect(),
    }))
}
