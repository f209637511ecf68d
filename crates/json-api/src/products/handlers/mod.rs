//! Product Handlers

use salvo::prelude::Request;
use tracing::Span;
use uuid::Uuid;

use cakeshop_app::domain::products::records::ProductUuid;

use crate::{envelope::FieldError, errors::ApiError};

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod related;

/// `{product}` path segment, recorded on the request span.
fn product_uuid(req: &Request) -> Result<ProductUuid, ApiError> {
    let product = req.param::<Uuid>("product").ok_or_else(|| {
        ApiError::validation(vec![FieldError {
            field: "product".to_string(),
            code: "uuid".to_string(),
            message: "must be a UUID".to_string(),
        }])
    })?;

    Span::current().record("product_uuid", tracing::field::display(product));

    Ok(ProductUuid::from_uuid(product))
}
