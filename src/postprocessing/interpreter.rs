//! Interprets the model's edit response as a list of search/replace operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("No valid operations returned")]
    NoOperations,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub search: String,
    pub replace: String,
}

impl EditOperation {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }

    /// `None` unless `search` is a non-empty string and `replace` is a string.
    pub fn from_value(value: &Value) -> Option<Self> {
        let search = value.get("search")?.as_str().filter(|s| !s.is_empty())?;
        let replace = value.get("replace")?.as_str()?;
        Some(Self::new(search, replace))
    }
}

/// Operations in application order. `malformed` counts array entries that
/// were dropped by `EditOperation::from_value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOperationList {
    pub operations: Vec<EditOperation>,
    pub malformed: usize,
}

impl EditOperationList {
    pub fn len(&self) -> usize {
        self.operations.len() + self.malformed
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses already-cleaned text. A non-array or an empty array yields
/// `NoOperations`; an array of only malformed entries does not.
pub fn interpret(cleaned: &str) -> Result<EditOperationList, InterpretError> {
    let value: Value = serde_json::from_str(cleaned)?;
    let entries = match value {
        Value::Array(entries) if !entries.is_empty() => entries,
        _ => return Err(InterpretError::NoOperations),
    };

    let mut list = EditOperationList::default();
    for entry in &entries {
        match EditOperation::from_value(entry) {
            Some(op) => list.operations.push(op),
            None => list.malformed += 1,
        }
    }
    Ok(list)
}
