//! Response Envelope

use jiff::Timestamp;
use salvo::prelude::Json;
use serde::{Deserialize, Serialize};

/// Successful response body: `{"success": true, "data": …, "timestamp": …}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: Timestamp,
}

/// Wrap handler output in the success envelope.
pub(crate) fn ok<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
        timestamp: Timestamp::now(),
    })
}

/// Failed response body: `{"success": false, "error": {…}, "timestamp": …}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    /// Machine-readable message key, e.g. `productDoesntExist`.
    pub code: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}
