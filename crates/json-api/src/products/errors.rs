//! Product Errors

use cakeshop_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => {
            ApiError::domain("productDoesntExist", "product does not exist")
        }
        ProductsServiceError::CriteriaNotImplemented(criteria) => ApiError::not_implemented(
            "relatedCriteriaNotImplemented",
            format!(
                "related products by {} are not implemented",
                criteria.as_str()
            ),
        ),
        ProductsServiceError::Sql(source) => ApiError::internal("failed to query products", source),
        error @ (ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData) => {
            ApiError::internal("unexpected product data error", error)
        }
    }
}
