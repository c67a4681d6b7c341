use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the backend for most failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // Back off to a character boundary; slicing mid-character panics
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    /// Prefer the backend's `detail` field, fall back to the raw body.
    fn message(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(detail) = parsed.detail {
                return detail;
            }
        }
        Self::truncate_body(body)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::message(body);
        match status.as_u16() {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "{}"),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, "{}"),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "{}"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "{}"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "{}"),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "{}"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "{}"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, "{}"),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // A euro sign (3 bytes) straddling the truncation point must not
        // panic the slice
        let mut body = "x".repeat(MAX_ERROR_BODY_LENGTH - 1);
        body.push('€');
        body.push_str(&"y".repeat(100));
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::ServerError(msg) => {
                assert!(msg.contains("truncated"));
                assert!(!msg.contains('€'));
                assert!(msg.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH - 1)));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Multi-byte bodies under the limit pass through whole
        let short = "é".repeat(100);
        let err = ApiError::from_status(StatusCode::NOT_FOUND, &short);
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, short),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn detail_field_is_preferred() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"detail": "You do not have permission to perform this action."}"#,
        );
        match err {
            ApiError::AccessDenied(msg) => {
                assert_eq!(msg, "You do not have permission to perform this action.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn raw_body_is_fallback() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "plain text body");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "plain text body"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::ServerError(msg) => {
                assert!(msg.contains("truncated"));
                assert!(msg.contains("2000 total bytes"));
                assert!(msg.len() < 600);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
