//! Log of past winners.

use serde::{Deserialize, Serialize};

/// A recorded winner.
///
/// Serialized as `{"result": "...", "index": n}` where `index` is the winning
/// entry's original index at the time of the spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    #[serde(rename = "result")]
    pub label: String,
    #[serde(rename = "index")]
    pub original_index: usize,
}

/// Append-only (until cleared) list of winners. Duplicates are expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultLog {
    results: Vec<SpinResult>,
}

impl ResultLog {
    pub fn new(results: Vec<SpinResult>) -> Self {
        Self { results }
    }

    pub fn record(&mut self, label: impl Into<String>, original_index: usize) {
        self.results.push(SpinResult {
            label: label.into(),
            original_index,
        });
    }

    pub fn results(&self) -> &[SpinResult] {
        &self.results
    }

    pub fn last(&self) -> Option<&SpinResult> {
        self.results.last()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Sorts by label. Original indices travel with their results.
    pub fn sort(&mut self) {
        if self.results.len() <= 1 {
            return;
        }
        self.results.sort_by(|a, b| a.label.cmp(&b.label));
    }

    /// Empties the log. Returns `false` if it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.results.is_empty() {
            return false;
        }
        self.results.clear();
        true
    }

    /// Winner labels, one per line, for the read-only results tab.
    pub fn labels_text(&self) -> String {
        self.results
            .iter()
            .map(|result| result.label.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
