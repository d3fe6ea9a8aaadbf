//! The list of names on the wheel.
//!
//! Entries are edited as free text, one per line. Each entry remembers the
//! position it was given when the list was last rebuilt (`original_index`), which
//! is how a recorded winner finds its way back to the exact entry that won even
//! when the same label appears more than once.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One name on the wheel.
///
/// Serialized as `{"entry": "...", "index": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "entry")]
    pub label: String,
    #[serde(rename = "index")]
    pub original_index: usize,
}

impl Entry {
    pub fn new(label: impl Into<String>, original_index: usize) -> Self {
        Self {
            label: label.into(),
            original_index,
        }
    }
}

/// Names used when nothing usable has been saved yet.
pub const DEFAULT_LABELS: [&str; 5] = ["Jason", "Mark", "Amy", "Brandon", "Lisa"];

/// Returns the built-in sample list.
pub fn default_entries() -> Vec<Entry> {
    DEFAULT_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| Entry::new(*label, i))
        .collect()
}

/// Ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parses free text: one entry per non-blank line, trimmed, indexed by position.
    pub fn from_text(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| Entry::new(line, i))
            .collect();
        Self { entries }
    }

    /// Labels joined by newlines, the inverse of [`EntryList::from_text`].
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.label.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rebuilds the list from edited text when the labels actually changed.
    ///
    /// Returns `true` if the list was replaced.
    pub fn sync_from_text(&mut self, text: &str) -> bool {
        let parsed = Self::from_text(text);
        let changed = parsed.entries.len() != self.entries.len()
            || parsed
                .entries
                .iter()
                .zip(&self.entries)
                .any(|(new, old)| new.label != old.label);

        if changed {
            *self = parsed;
        }
        changed
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Sorts by label and renumbers. Lists of zero or one entry are left alone.
    pub fn sort(&mut self) {
        if self.entries.len() <= 1 {
            return;
        }
        self.entries.sort_by(|a, b| a.label.cmp(&b.label));
        self.reindex();
    }

    /// Shuffles into an order whose labels differ from the current order, then
    /// renumbers.
    ///
    /// Returns `false` without touching the list when no different order exists:
    /// fewer than two entries, or every label identical.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let first = &self.entries[0].label;
        if self.entries.iter().all(|entry| &entry.label == first) {
            return false;
        }

        let current: Vec<String> = self.labels().map(str::to_owned).collect();
        loop {
            self.entries.shuffle(rng);
            if !self.labels().eq(current.iter().map(String::as_str)) {
                break;
            }
        }
        self.reindex();
        true
    }

    /// Removes the entry carrying `original_index`. Returns whether one was removed.
    pub fn remove_by_index(&mut self, original_index: usize) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.original_index != original_index);
        self.entries.len() != before
    }

    /// Removes every entry labelled `label`. Returns how many were removed.
    pub fn remove_all(&mut self, label: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.label != label);
        before - self.entries.len()
    }

    /// Whether `label` appears more than once.
    pub fn has_duplicate(&self, label: &str) -> bool {
        self.entries
            .iter()
            .filter(|entry| entry.label == label)
            .take(2)
            .count()
            > 1
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    fn reindex(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.original_index = i;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn list(labels: &[&str]) -> EntryList {
        EntryList::from_text(&labels.join("\n"))
    }

    fn labels(list: &EntryList) -> Vec<&str> {
        list.labels().collect()
    }

    #[test]
    fn test_from_text_trims_and_skips_blank_lines() {
        let parsed = EntryList::from_text("  Jason \n\n   \nMark\nAmy  ");
        assert_eq!(
            parsed.entries(),
            &[Entry::new("Jason", 0), Entry::new("Mark", 1), Entry::new("Amy", 2)]
        );
    }

    #[test]
    fn test_from_text_empty() {
        assert!(EntryList::from_text("").is_empty());
        assert!(EntryList::from_text("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_to_text_joins_labels() {
        assert_eq!(list(&["a", "b", "c"]).to_text(), "a\nb\nc");
    }

    #[test]
    fn test_sync_from_text_only_when_labels_change() {
        let mut entries = list(&["Jason", "Mark"]);
        assert!(!entries.sync_from_text("Jason\nMark\n"));
        assert!(!entries.sync_from_text("  Jason\n\nMark"));
        assert!(entries.sync_from_text("Jason\nMarkus"));
        assert_eq!(labels(&entries), vec!["Jason", "Markus"]);
        assert!(entries.sync_from_text("Jason"));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_sort_orders_and_reindexes() {
        let mut entries = list(&["Mark", "Amy", "Jason"]);
        entries.sort();
        assert_eq!(
            entries.entries(),
            &[Entry::new("Amy", 0), Entry::new("Jason", 1), Entry::new("Mark", 2)]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut entries = list(&["b", "c", "a", "b"]);
        entries.sort();
        let once = entries.clone();
        entries.sort();
        assert_eq!(entries, once);
    }

    #[test]
    fn test_sort_single_entry_is_untouched() {
        let mut entries = EntryList::new(vec![Entry::new("solo", 7)]);
        entries.sort();
        assert_eq!(entries.entries(), &[Entry::new("solo", 7)]);
    }

    #[test]
    fn test_shuffle_always_changes_order() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut entries = list(&["a", "b"]);
        for _ in 0..50 {
            let before: Vec<String> = entries.labels().map(str::to_owned).collect();
            assert!(entries.shuffle(&mut rng));
            let after: Vec<String> = entries.labels().map(str::to_owned).collect();
            assert_ne!(before, after);
        }
    }

    #[test]
    fn test_shuffle_keeps_members_and_reindexes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut entries = list(&["Jason", "Mark", "Amy", "Brandon", "Lisa"]);
        entries.shuffle(&mut rng);

        let mut shuffled = labels(&entries);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["Amy", "Brandon", "Jason", "Lisa", "Mark"]);
        for (i, entry) in entries.entries().iter().enumerate() {
            assert_eq!(entry.original_index, i);
        }
    }

    #[test]
    fn test_shuffle_skipped_for_short_lists() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut empty = EntryList::default();
        assert!(!empty.shuffle(&mut rng));

        let mut one = list(&["only"]);
        assert!(!one.shuffle(&mut rng));
        assert_eq!(labels(&one), vec!["only"]);
    }

    #[test]
    fn test_shuffle_skipped_when_all_labels_equal() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut same = list(&["x", "x", "x"]);
        assert!(!same.shuffle(&mut rng));
    }

    #[test]
    fn test_remove_by_index_removes_exactly_one() {
        let mut entries = list(&["Amy", "Mark", "Amy"]);
        assert!(entries.remove_by_index(2));
        assert_eq!(
            entries.entries(),
            &[Entry::new("Amy", 0), Entry::new("Mark", 1)]
        );
        assert!(!entries.remove_by_index(2));
    }

    #[test]
    fn test_remove_all_removes_every_match() {
        let mut entries = list(&["Amy", "Mark", "Amy", "Lisa"]);
        assert_eq!(entries.remove_all("Amy"), 2);
        assert_eq!(labels(&entries), vec!["Mark", "Lisa"]);
        assert_eq!(entries.remove_all("Nobody"), 0);
    }

    #[test]
    fn test_has_duplicate() {
        let entries = list(&["Amy", "Mark", "Amy"]);
        assert!(entries.has_duplicate("Amy"));
        assert!(!entries.has_duplicate("Mark"));
        assert!(!entries.has_duplicate("Lisa"));
    }

    #[test]
    fn test_default_entries() {
        let defaults = default_entries();
        assert_eq!(defaults.len(), 5);
        assert_eq!(defaults[0], Entry::new("Jason", 0));
        assert_eq!(defaults[4], Entry::new("Lisa", 4));
    }

    #[test]
    fn test_entry_wire_format() {
        let json = serde_json::to_string(&Entry::new("Amy", 2)).unwrap();
        assert_eq!(json, r#"{"entry":"Amy","index":2}"#);
    }
}
