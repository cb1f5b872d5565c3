//! Natural-language edit → search/replace operations → updated site.

use crate::engine::{EditRequest, EngineError, EngineResult};
use crate::llm::{ChatClient, ChatRequest};
use crate::postprocessing::{clean, interpret, Applier, ApplyOutcome};
use crate::preprocessing::EditPrompt;
use tracing::{info, instrument, warn};

pub struct PatchApplier<'a> {
    client: &'a dyn ChatClient,
    model: &'a str,
}

impl<'a> PatchApplier<'a> {
    pub fn new(client: &'a dyn ChatClient, model: &'a str) -> Self {
        Self { client, model }
    }

    /// Succeeds when at least one proposed operation matched. Skipped
    /// operations are logged but never reported to the caller.
    #[instrument(skip_all, fields(html_len = request.current_html.len(), history = request.history.len()))]
    pub async fn apply(&self, api_key: &str, request: &EditRequest) -> EngineResult<ApplyOutcome> {
        let messages = EditPrompt::messages(&request.current_html, &request.instruction, &request.history)
            .map_err(|e| EngineError::invalid_body(&e))?;
        let chat = ChatRequest {
            model: self.model.to_string(),
            messages,
        };
        let raw = self.client.complete(api_key, &chat).await?;

        let list = interpret(&clean(&raw))?;
        let outcome = Applier::apply(&request.current_html, &list.operations);

        info!(
            proposed = list.len(),
            malformed = list.malformed,
            applied = outcome.applied,
            missed = outcome.missed,
            "Edit operations processed"
        );

        if outcome.applied == 0 {
            warn!("None of the proposed edits matched the current HTML");
            return Err(EngineError::NoMatchingContent);
        }
        Ok(outcome)
    }
}
