// Handlers are split by security tier:
// public (no authentication) and protected (JWT bearer required).
pub mod protected;
pub mod public;

use crate::error::ApiError;

/// Presence check for required request fields. Absent, null, and empty
/// string are all "missing".
pub(crate) fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("missing {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn present_field_passes() {
        assert_eq!(require_field(Some("alice"), "username").unwrap(), "alice");
    }

    #[test]
    fn absent_field_is_bad_request() {
        let err = require_field(None, "username").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("username"));
    }

    #[test]
    fn empty_field_is_bad_request() {
        assert!(require_field(Some(""), "name").is_err());
    }
}
