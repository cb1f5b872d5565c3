use serde::Deserialize;
use thiserror::Error;

/// Failure of the upstream chat-completion call, carried to the caller as
/// `"{name}: {message}"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct UpstreamError {
    pub name: String,
    pub message: String,
}

impl UpstreamError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new("APIConnectionTimeoutError", "Request timed out.")
        } else if err.is_connect() {
            Self::new("APIConnectionError", format!("Connection error: {}", err))
        } else if err.is_decode() {
            Self::new("InvalidResponseError", format!("Failed to decode response: {}", err))
        } else {
            Self::new("APIConnectionError", format!("Network error: {}", err))
        }
    }

    /// Maps a non-success status and its body onto an SDK-style error name.
    pub fn from_status(status: u16, body: &str) -> Self {
        let name = match status {
            400 => "BadRequestError",
            401 => "AuthenticationError",
            403 => "PermissionDeniedError",
            404 => "NotFoundError",
            409 => "ConflictError",
            422 => "UnprocessableEntityError",
            429 => "RateLimitError",
            500..=599 => "InternalServerError",
            _ => "APIError",
        };
        let detail = provider_message(body).unwrap_or_else(|| body.trim().to_string());
        let message = if detail.is_empty() {
            format!("{} status code (no body)", status)
        } else {
            format!("{} {}", status, detail)
        };
        Self::new(name, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new("InvalidResponseError", message)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names() {
        assert_eq!(UpstreamError::from_status(401, "").name, "AuthenticationError");
        assert_eq!(UpstreamError::from_status(429, "").name, "RateLimitError");
        assert_eq!(UpstreamError::from_status(503, "").name, "InternalServerError");
        assert_eq!(UpstreamError::from_status(418, "").name, "APIError");
    }

    #[test]
    fn provider_message_is_preferred_over_raw_body() {
        let err = UpstreamError::from_status(
            401,
            r#"{"error":{"message":"Invalid Authentication","type":"invalid_authentication_error"}}"#,
        );
        assert_eq!(err.to_string(), "AuthenticationError: 401 Invalid Authentication");
    }

    #[test]
    fn raw_body_used_when_not_json() {
        let err = UpstreamError::from_status(502, "bad gateway\n");
        assert_eq!(err.message, "502 bad gateway");
        let err = UpstreamError::from_status(500, "");
        assert_eq!(err.message, "500 status code (no body)");
    }
}
