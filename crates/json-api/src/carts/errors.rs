//! Cart Errors

use cakeshop_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::ProductDoesntExist => {
            ApiError::domain("productDoesntExist", "product does not exist")
        }
        CartsServiceError::ProductNotAvailable => {
            ApiError::domain("productNotAvailable", "product is not available")
        }
        CartsServiceError::FlavorNotAvailable => ApiError::domain(
            "flavorNotAvailable",
            "flavor is not available for this product",
        ),
        CartsServiceError::SizeNotAvailable => ApiError::domain(
            "sizeNotAvailable",
            "size is not available for this product",
        ),
        CartsServiceError::InvalidQuantity => {
            ApiError::domain("invalidQuantity", "quantity must be between 1 and 10")
        }
        CartsServiceError::QuantityExceedsMaximum => ApiError::domain(
            "quantityExceedsMaximum",
            "cart line would exceed the maximum quantity of 10",
        ),
        CartsServiceError::NotFound => ApiError::domain("cartNotFound", "cart not found"),
        CartsServiceError::Sql(source) => ApiError::internal("failed to update cart", source),
        error @ (CartsServiceError::InvalidPrice
        | CartsServiceError::AlreadyExists
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData) => {
            ApiError::internal("unexpected cart data error", error)
        }
    }
}
