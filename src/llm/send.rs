use crate::config::Config;
use crate::llm::{ChatRequest, ChatResponse, UpstreamError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// One chat-completion round-trip. Returns the text of the first choice.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, UpstreamError>;
}

/// reqwest-backed client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    completions_url: String,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("completions_url", &self.completions_url)
            .finish()
    }
}

impl HttpChatClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            completions_url: config.completions_url(),
        })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    #[instrument(skip_all, fields(model = %request.model, messages = request.messages.len()))]
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::from_status(status.as_u16(), &error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(&e))?;
        let completion: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::invalid_response(format!("Failed to parse API response as JSON: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::invalid_response("API response contained no message content"))?;

        debug!(length = content.len(), "Completion received");
        Ok(content)
    }
}
