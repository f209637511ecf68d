//! API Errors

use std::{
    borrow::Cow,
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use salvo::{
    http::{ParseError, StatusCode},
    prelude::{Json, Response},
    writing::Scribe,
};
use thiserror::Error;
use tracing::error;
use validator::{ValidationError, ValidationErrors};

use crate::{
    config::AppEnv,
    envelope::{ErrorBody, ErrorEnvelope, FieldError},
    observability::observe_api_error,
};

static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(true);

/// Only non-production servers put internal error text in 500 responses.
pub(crate) fn configure(app_env: AppEnv) {
    EXPOSE_ERROR_DETAILS.store(app_env != AppEnv::Production, Ordering::Relaxed);
}

fn expose_error_details() -> bool {
    EXPOSE_ERROR_DETAILS.load(Ordering::Relaxed)
}

/// Error rendered as the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .body.code, .body.message)]
pub(crate) struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details: Vec::new(),
            },
        }
    }

    /// Expected business-rule failure, always a 400.
    pub(crate) fn domain(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub(crate) fn validation(details: Vec<FieldError>) -> Self {
        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            "validationError",
            "request validation failed",
        );

        error.body.details = details;

        error
    }

    /// Request could not be decoded at all (malformed JSON, wrong types).
    pub(crate) fn malformed(source: &ParseError) -> Self {
        Self::validation(vec![FieldError {
            field: "request".to_string(),
            code: "malformed".to_string(),
            message: source.to_string(),
        }])
    }

    pub(crate) fn account_id_required() -> Self {
        Self::domain("accountIdRequired", "account identifier required")
    }

    pub(crate) fn not_implemented(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED, code, message)
    }

    /// Log the failure and hide it behind a generic 500.
    pub(crate) fn internal(context: &str, source: impl Display) -> Self {
        error!("{context}: {source}");

        let message = if expose_error_details() {
            format!("{context}: {source}")
        } else {
            "internal server error".to_string()
        };

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internalServerError", message)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                let field = camel_case(&field);

                failures
                    .iter()
                    .map(move |failure| field_error(&field, failure))
            })
            .collect();

        details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));

        Self::validation(details)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        observe_api_error(&self.body.code);

        res.status_code(self.status);
        res.render(Json(ErrorEnvelope {
            success: false,
            error: self.body,
            timestamp: Timestamp::now(),
        }));
    }
}

fn field_error(field: &str, failure: &ValidationError) -> FieldError {
    let message = failure
        .message
        .as_ref()
        .map_or_else(|| default_message(&failure.code), Cow::to_string);

    FieldError {
        field: field.to_string(),
        code: failure.code.to_string(),
        message,
    }
}

fn default_message(code: &str) -> String {
    match code {
        "required" => "is required".to_string(),
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        other => format!("failed `{other}` validation"),
    }
}

/// Request fields are validated under their Rust names; clients know them in camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}
