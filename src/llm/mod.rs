//! # Upstream model access
//!
//! Everything needed to talk to an OpenAI-compatible chat-completion service:
//! - `types`: request/response wire structures, including multimodal content parts
//! - `send`: the `ChatClient` seam and its reqwest implementation
//! - `error`: `UpstreamError`, the single failure type surfaced by a model call
//!
//! ## Flow
//!
//! ```text
//! engine (builds ChatRequest) → ChatClient::complete → choices[0].message.content
//! ```
//!
//! Calls are made exactly once per request. There is no retry or backoff here;
//! any timeout comes from `Config::request_timeout_secs` or the caller.

pub mod error;
pub mod send;
pub mod types;

pub use error::UpstreamError;
pub use send::{ChatClient, HttpChatClient};
pub use types::{ChatRequest, ChatResponse, ContentPart, ImageUrl, Message, MessageContent, Role};
