use crate::llm::{ContentPart, ImageUrl, Message};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Answers keyed by question index (`"1"` through `"5"`). Values are kept as
/// raw JSON since forms send `null` or numbers for some fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct FormAnswers(BTreeMap<String, Value>);

impl FormAnswers {
    pub const PLACEHOLDER: &'static str = "Not provided";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, index: u8, answer: impl Into<String>) -> Self {
        self.0.insert(index.to_string(), Value::String(answer.into()));
        self
    }

    /// The answer for `index` as prompt text. Missing, `null`, `false`, `0`
    /// and empty answers all read as the placeholder.
    pub fn answer(&self, index: u8) -> Cow<'_, str> {
        match self.0.get(&index.to_string()) {
            Some(Value::String(text)) if !text.is_empty() => Cow::Borrowed(text),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Cow::Owned(n.to_string()),
            Some(Value::Bool(true)) => Cow::Borrowed("true"),
            Some(value @ (Value::Array(_) | Value::Object(_))) => Cow::Owned(value.to_string()),
            _ => Cow::Borrowed(Self::PLACEHOLDER),
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

/// A data-URI image forwarded to the model as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ImageAttachment(String);

impl ImageAttachment {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    /// An empty data URI is treated as no image at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct GenerationPrompt;

impl GenerationPrompt {
    pub const SYSTEM: &'static str = "You are a website builder that makes beautiful and functional websites. You only write code, nothing else. Do not say anything else or write anything besides just code. NOTHING ELSE. ONLY CODE. Make the websites very beautiful, but also unique and interesting. dont make generic websites that look like they were made by AI. Users should be wowed by the websites. Return a complete single HTML file with inline CSS and JavaScript. If an image is provided, embed it using its base64 data URI directly in the src attribute of an <img> tag.";

    const QUESTIONS: [&'static str; 5] = [
        "Name of the business",
        "Describes what the business does",
        "What the vibe of the website should be like",
        "What is the address of your establishment",
        "What products are you selling",
    ];

    const IMAGE_NOTE: &'static str = " I have also attached an image — use it as the hero image or logo by embedding the base64 src directly in an <img> tag.";

    pub fn text(answers: &FormAnswers, has_image: bool) -> String {
        let mut text = String::from(
            "I want to make a Beautiful website based on the answers to a form given to a user. Here are the form questions and answers:\n",
        );
        for (i, question) in Self::QUESTIONS.iter().enumerate() {
            let index = (i + 1) as u8;
            text.push_str(&format!("{}. {}: {}\n", index, question, answers.answer(index)));
        }
        text.push_str(
            "Based on this information, generate a complete, single-file HTML website. Include inline CSS and JavaScript. Make it beautiful and professional.",
        );
        if has_image {
            text.push_str(Self::IMAGE_NOTE);
        }
        text
    }

    /// System instruction followed by one user turn; the image, if any, rides
    /// along as a second content part.
    pub fn messages(answers: &FormAnswers, image: Option<&ImageAttachment>) -> Vec<Message> {
        let mut parts = vec![ContentPart::Text {
            text: Self::text(answers, image.is_some()),
        }];
        if let Some(image) = image {
            parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.as_str().to_string(),
                },
            });
        }
        vec![Message::system(Self::SYSTEM), Message::user_parts(parts)]
    }
}
