//! Sequential search/replace over the working copy of the HTML.

use super::interpreter::EditOperation;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub html: String,
    pub applied: usize,
    pub missed: usize,
}

pub struct Applier;

impl Applier {
    /// Single pass in list order. Each operation sees the text left by the
    /// ones before it and replaces only the first occurrence of `search`;
    /// operations whose `search` is absent are skipped.
    pub fn apply(current_html: &str, operations: &[EditOperation]) -> ApplyOutcome {
        let mut html = current_html.to_string();
        let mut applied = 0;
        let mut missed = 0;

        for (index, op) in operations.iter().enumerate() {
            match html.find(op.search.as_str()) {
                Some(at) => {
                    html.replace_range(at..at + op.search.len(), &op.replace);
                    applied += 1;
                }
                None => {
                    debug!(index, search_len = op.search.len(), "Edit operation did not match");
                    missed += 1;
                }
            }
        }

        ApplyOutcome {
            html,
            applied,
            missed,
        }
    }
}
