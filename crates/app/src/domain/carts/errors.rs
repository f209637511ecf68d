//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product does not exist")]
    ProductDoesntExist,

    #[error("product is not available")]
    ProductNotAvailable,

    #[error("flavor is not available for this product")]
    FlavorNotAvailable,

    #[error("size is not available for this product")]
    SizeNotAvailable,

    #[error("quantity must be between 1 and 10")]
    InvalidQuantity,

    #[error("cart line would exceed the maximum quantity")]
    QuantityExceedsMaximum,

    #[error("invalid price value")]
    InvalidPrice,

    #[error("cart not found")]
    NotFound,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
