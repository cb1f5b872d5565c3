use crate::llm::{Message, MessageContent, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A prior turn supplied by the caller. Only user turns are ever read, so
/// both fields stay raw until then.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryTurn {
    #[serde(default)]
    pub role: Value,
    #[serde(default)]
    pub content: Value,
}

impl HistoryTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Value::String(role.into()),
            content: Value::String(content.into()),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    /// Content of a user turn as sent upstream: a string or a list of parts.
    /// Missing content counts as empty text.
    pub fn user_message(&self) -> Result<Message, serde_json::Error> {
        let content = match &self.content {
            Value::Null => MessageContent::Text(String::new()),
            other => MessageContent::deserialize(other)?,
        };
        Ok(Message {
            role: Role::User,
            content,
        })
    }
}

pub struct EditPrompt;

impl EditPrompt {
    pub const SYSTEM: &'static str = r#"You are a precise website editor. You receive the current HTML and a change request.

You must respond with ONLY a JSON array of search-and-replace operations. Each operation is an object with "search" and "replace" keys.

- "search" must be an EXACT substring from the current HTML (copy it character-for-character).
- "replace" is what it should be changed to.
- Use as few operations as possible.
- Only change what is necessary to fulfill the request.
- Make sure search strings are unique enough to match only once.

Example response:
[
  { "search": "background-color: red", "replace": "background-color: blue" },
  { "search": "<h1>Old Title</h1>", "replace": "<h1>New Title</h1>" }
]

ONLY output valid JSON. No markdown, no explanation, no code fences."#;

    pub fn instruction(current_html: &str, instruction: &str) -> String {
        format!(
            "Here is the current HTML:\n\n{}\n\n---\n\nApply this change: {}",
            current_html, instruction
        )
    }

    /// System instruction, then prior user turns in order, then the edit request.
    /// Assistant and system turns from history are not forwarded, and their
    /// content is never inspected.
    pub fn messages(
        current_html: &str,
        instruction: &str,
        history: &[HistoryTurn],
    ) -> Result<Vec<Message>, serde_json::Error> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(Self::SYSTEM));
        for turn in history.iter().filter(|turn| turn.is_user()) {
            messages.push(turn.user_message()?);
        }
        messages.push(Message::user(Self::instruction(current_html, instruction)));
        Ok(messages)
    }
}
