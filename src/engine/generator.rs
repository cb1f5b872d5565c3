//! Form answers → generated single-file site.

use crate::engine::{EngineResult, GenerateRequest};
use crate::llm::{ChatClient, ChatRequest};
use crate::postprocessing::clean;
use crate::preprocessing::GenerationPrompt;
use tracing::{info, instrument};

pub struct Generator<'a> {
    client: &'a dyn ChatClient,
    model: &'a str,
}

impl<'a> Generator<'a> {
    pub fn new(client: &'a dyn ChatClient, model: &'a str) -> Self {
        Self { client, model }
    }

    /// One upstream call; the reply is returned with its code fence removed.
    #[instrument(skip_all)]
    pub async fn generate(&self, api_key: &str, request: &GenerateRequest) -> EngineResult<String> {
        let image = request.image();
        info!(answers = ?request.answers.keys(), image = image.is_some(), "Received answers");

        let chat = ChatRequest {
            model: self.model.to_string(),
            messages: GenerationPrompt::messages(&request.answers, image),
        };
        let raw = self.client.complete(api_key, &chat).await?;
        let html = clean(&raw);

        info!(raw_len = raw.len(), html_len = html.len(), "Site generated");
        Ok(html)
    }
}
