use crate::llm::UpstreamError;
use crate::postprocessing::InterpretError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credential; nothing was sent upstream.
    Configuration,
    /// The inbound body could not be read as the endpoint's JSON shape.
    InvalidRequest,
    Upstream,
    /// Model text that should have been JSON was not.
    MalformedResponse,
    /// Parsed fine, but nothing usable: no operations, or none matched.
    SemanticEmpty,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("{name}: {message}")]
    InvalidRequest { name: &'static str, message: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Model returned invalid JSON")]
    InvalidModelOutput(#[source] serde_json::Error),

    #[error("No valid operations returned")]
    NoOperations,

    #[error("Could not apply changes — no matching content found")]
    NoMatchingContent,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingCredential => ErrorKind::Configuration,
            EngineError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            EngineError::Upstream(_) => ErrorKind::Upstream,
            EngineError::InvalidModelOutput(_) => ErrorKind::MalformedResponse,
            EngineError::NoOperations | EngineError::NoMatchingContent => ErrorKind::SemanticEmpty,
        }
    }

    /// Syntax problems read as `SyntaxError`, shape problems as `TypeError`.
    pub fn invalid_body(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;
        let name = match err.classify() {
            Category::Data => "TypeError",
            Category::Syntax | Category::Eof | Category::Io => "SyntaxError",
        };
        EngineError::InvalidRequest {
            name,
            message: err.to_string(),
        }
    }

    pub fn unreadable_body(message: impl Into<String>) -> Self {
        EngineError::InvalidRequest {
            name: "SyntaxError",
            message: message.into(),
        }
    }
}

impl From<InterpretError> for EngineError {
    fn from(err: InterpretError) -> Self {
        match err {
            InterpretError::InvalidJson(e) => EngineError::InvalidModelOutput(e),
            InterpretError::NoOperations => EngineError::NoOperations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_wire_contract() {
        assert_eq!(EngineError::MissingCredential.to_string(), "API key not configured");
        assert_eq!(EngineError::NoOperations.to_string(), "No valid operations returned");
        assert_eq!(
            EngineError::NoMatchingContent.to_string(),
            "Could not apply changes — no matching content found"
        );
        let upstream = EngineError::from(UpstreamError::new("RateLimitError", "429 slow down"));
        assert_eq!(upstream.to_string(), "RateLimitError: 429 slow down");
    }

    #[test]
    fn body_errors_are_classified() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(EngineError::invalid_body(&syntax).to_string().starts_with("SyntaxError: "));

        let data = serde_json::from_str::<Vec<String>>("{}").unwrap_err();
        assert!(EngineError::invalid_body(&data).to_string().starts_with("TypeError: "));
    }

    #[test]
    fn interpret_errors_keep_their_kind() {
        let invalid = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = EngineError::from(InterpretError::InvalidJson(invalid));
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(
            EngineError::from(InterpretError::NoOperations).kind(),
            ErrorKind::SemanticEmpty
        );
    }
}
