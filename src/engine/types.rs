//! Request bodies for the two endpoints.

use crate::preprocessing::{FormAnswers, HistoryTurn, ImageAttachment};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: FormAnswers,
    #[serde(default)]
    pub image: Option<ImageAttachment>,
}

impl GenerateRequest {
    /// The attached image, ignoring an empty data URI.
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref().filter(|image| !image.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub current_html: String,
    pub instruction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryTurn>,
}
