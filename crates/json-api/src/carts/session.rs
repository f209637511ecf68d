//! Session ids

use validator::ValidationError;

/// Session ids made only of whitespace would key a cart by blanks.
pub(crate) fn validate_session_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("blank").with_message("sessionId must not be blank".into()),
        );
    }

    Ok(())
}
