use crate::config::{Config, CredentialSource};
use crate::engine::{EditRequest, EngineError, GenerateRequest, Generator, PatchApplier};
use crate::llm::ChatClient;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

// Shared, read-only across requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn ChatClient>,
    pub credentials: Arc<dyn CredentialSource>,
}

impl AppState {
    pub fn new(
        config: Config,
        client: Arc<dyn ChatClient>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            client,
            credentials,
        }
    }
}

/// `{ success, result }` or `{ success, error }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(result: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Every failure goes out as a 500 with the flat envelope.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(kind = ?self.0.kind(), error = %self.0, "Request failed");
        let body = ApiResponse::failure(self.0.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, EngineError> {
    let bytes = body.map_err(|rejection| EngineError::unreadable_body(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| EngineError::invalid_body(&e))
}

/* ---------- 1.  GENERATE ---------- */

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn process(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    // Credential first: no key, no upstream call and no body parsing.
    let api_key = state
        .credentials
        .api_key()
        .ok_or(EngineError::MissingCredential)?;
    let request: GenerateRequest = parse_body(body)?;

    let html = Generator::new(state.client.as_ref(), &state.config.model)
        .generate(&api_key, &request)
        .await?;

    Ok(Json(ApiResponse::success(html)))
}

/* ---------- 2.  EDIT ---------- */

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn update(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let api_key = state
        .credentials
        .api_key()
        .ok_or(EngineError::MissingCredential)?;
    let request: EditRequest = parse_body(body)?;

    let outcome = PatchApplier::new(state.client.as_ref(), &state.config.model)
        .apply(&api_key, &request)
        .await?;

    Ok(Json(ApiResponse::success(outcome.html)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_omits_absent_fields() {
        assert_eq!(
            serde_json::to_value(ApiResponse::success("<p></p>".into())).unwrap(),
            json!({ "success": true, "result": "<p></p>" })
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::failure("boom".into())).unwrap(),
            json!({ "success": false, "error": "boom" })
        );
    }

    #[test]
    fn malformed_body_is_a_syntax_error() {
        let err = parse_body::<EditRequest>(Ok(Bytes::from_static(b"{oops"))).unwrap_err();
        assert!(err.to_string().starts_with("SyntaxError: "));
    }

    #[test]
    fn wrong_shape_is_a_type_error() {
        let err = parse_body::<EditRequest>(Ok(Bytes::from_static(br#"{"instruction":"x"}"#))).unwrap_err();
        assert!(err.to_string().starts_with("TypeError: "));
        assert!(err.to_string().contains("currentHtml"));
    }
}
