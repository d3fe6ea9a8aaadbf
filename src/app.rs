//! Application state management module.
//!
//! This module ties the entry list, the results log, the spin engine and the
//! store together, and exposes the actions the key bindings trigger.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use std::time::Instant;

use crate::config::Config;
use crate::entries::{Entry, EntryList};
use crate::results::{ResultLog, SpinResult};
use crate::spin::{SpinEngine, SpinFrame};
use crate::store::{self, KeyValueStore};
use crate::ui::{Theme, ThemePreset};
use crate::wheel::WheelLayout;

/// Which list the side panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Editable entry text
    Entries,
    /// Read-only winners log
    Results,
}

/// Overlay currently shown above the main view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    None,
    /// Announces the winner of the last spin
    Winner(SpinResult),
}

/// Main application state container.
pub struct App {
    /// Colors used by the renderer
    pub theme: Theme,
    /// Names on the wheel
    pub entries: EntryList,
    /// Past winners
    pub results: ResultLog,
    /// Raw text of the entries tab, as typed
    pub text: String,
    /// Tab shown in the side panel
    pub tab: Tab,
    /// Whether keystrokes go to the entries text
    pub editing: bool,
    /// Whether help overlay is shown
    pub show_help: bool,
    /// Overlay state
    pub modal_state: ModalState,
    /// Status message displayed to user
    pub status_message: String,

    engine: SpinEngine,
    rng: StdRng,
    store: Box<dyn KeyValueStore>,
}

impl App {
    /// Creates the application, loading saved entries and results from `store`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read. Malformed stored data is not
    /// an error; it falls back to defaults.
    pub fn new(config: &Config, store: Box<dyn KeyValueStore>, rng: StdRng) -> Result<Self> {
        let entries = store::load_entries(store.as_ref()).context("Failed to load entries")?;
        let results = store::load_results(store.as_ref()).context("Failed to load results")?;
        let theme = Theme::from_preset(ThemePreset::from_name(&config.ui.theme));
        let engine = SpinEngine::new(&config.spin);

        tracing::info!(
            entries = entries.len(),
            results = results.len(),
            "loaded wheel state"
        );

        Ok(Self {
            text: entries.to_text(),
            status_message: format!("Loaded {} entries", entries.len()),
            theme,
            entries,
            results,
            tab: Tab::Entries,
            editing: false,
            show_help: false,
            modal_state: ModalState::None,
            engine,
            rng,
            store,
        })
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    pub fn rotation(&self) -> f64 {
        self.engine.rotation()
    }

    /// Fraction of the running spin that has elapsed.
    pub fn spin_progress(&self, now: Instant) -> Option<f64> {
        self.engine.progress(now)
    }

    /// Entries that get a slice: those whose label is not blank.
    pub fn wheel_entries(&self) -> Vec<&Entry> {
        self.entries
            .entries()
            .iter()
            .filter(|entry| !entry.label.trim().is_empty())
            .collect()
    }

    pub fn wheel_layout(&self) -> WheelLayout {
        WheelLayout::new(self.entries.labels(), self.engine.rotation())
    }

    /// Label of the slice currently under the pointer, if the wheel has entries.
    pub fn pointer_label(&self) -> Option<&str> {
        let layout = self.wheel_layout();
        if layout.is_placeholder() {
            return None;
        }
        self.wheel_entries()
            .get(layout.pointer_slice())
            .copied()
            .map(|entry| entry.label.as_str())
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn next_tab(&mut self) {
        self.editing = false;
        self.tab = match self.tab {
            Tab::Entries => Tab::Results,
            Tab::Results => Tab::Entries,
        };
    }

    /// Starts a spin. Ignored while spinning, while a modal is open, or when
    /// there is nothing on the wheel.
    pub fn spin(&mut self, now: Instant) {
        if self.modal_state != ModalState::None {
            return;
        }
        if self.wheel_entries().is_empty() {
            self.status_message = "Add some entries before spinning".to_string();
            return;
        }
        if self.engine.request_spin(&mut self.rng, now) {
            self.editing = false;
            self.status_message = "Spinning...".to_string();
            tracing::info!(entries = self.wheel_entries().len(), "spin requested");
        }
    }

    /// Advances the spin animation; called once per frame.
    ///
    /// # Errors
    /// Returns an error if recording the winner fails to persist.
    pub fn on_frame(&mut self, now: Instant) -> Result<()> {
        let slice_count = self.wheel_entries().len();
        if let SpinFrame::Finished { winner, .. } = self.engine.tick(now, slice_count) {
            self.finish_spin(winner)?;
        }
        Ok(())
    }

    fn finish_spin(&mut self, slice: usize) -> Result<()> {
        let Some(entry) = self.wheel_entries().get(slice).map(|entry| (*entry).clone()) else {
            tracing::warn!(slice, "spin finished on a slice with no entry");
            self.status_message = "Spin finished with no winner".to_string();
            return Ok(());
        };

        self.results.record(entry.label.clone(), entry.original_index);
        self.save_results()?;

        tracing::info!(winner = %entry.label, index = entry.original_index, "winner selected");
        self.status_message = format!("Winner: {}", entry.label);
        self.modal_state = ModalState::Winner(SpinResult {
            label: entry.label,
            original_index: entry.original_index,
        });
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal_state = ModalState::None;
    }

    /// Whether the winner shown in the modal appears more than once in the list.
    pub fn winner_has_duplicate(&self) -> bool {
        match &self.modal_state {
            ModalState::Winner(winner) => self.entries.has_duplicate(&winner.label),
            ModalState::None => false,
        }
    }

    /// Removes the exact entry that won, then closes the modal.
    pub fn remove_winner(&mut self) -> Result<()> {
        let ModalState::Winner(winner) = std::mem::replace(&mut self.modal_state, ModalState::None)
        else {
            return Ok(());
        };

        if self.entries.remove_by_index(winner.original_index) {
            tracing::info!(label = %winner.label, index = winner.original_index, "removed winner");
            self.status_message = format!("Removed {}", winner.label);
            self.entries_changed()?;
        }
        Ok(())
    }

    /// Removes every entry sharing the winner's label, then closes the modal.
    pub fn remove_winner_everywhere(&mut self) -> Result<()> {
        let ModalState::Winner(winner) = std::mem::replace(&mut self.modal_state, ModalState::None)
        else {
            return Ok(());
        };

        let removed = self.entries.remove_all(&winner.label);
        if removed > 0 {
            tracing::info!(label = %winner.label, removed, "removed all matching entries");
            self.status_message = format!("Removed {removed} × {}", winner.label);
            self.entries_changed()?;
        }
        Ok(())
    }

    /// Sorts whichever list the current tab shows.
    pub fn sort_current(&mut self) -> Result<()> {
        if self.is_spinning() {
            return Ok(());
        }
        match self.tab {
            Tab::Entries => {
                if self.entries.len() <= 1 {
                    return Ok(());
                }
                self.entries.sort();
                self.status_message = "Entries sorted".to_string();
                self.entries_changed()
            }
            Tab::Results => {
                if self.results.len() <= 1 {
                    return Ok(());
                }
                self.results.sort();
                self.status_message = "Results sorted".to_string();
                self.save_results()
            }
        }
    }

    pub fn shuffle_entries(&mut self) -> Result<()> {
        if self.is_spinning() || self.tab != Tab::Entries {
            return Ok(());
        }
        if self.entries.shuffle(&mut self.rng) {
            self.status_message = "Entries shuffled".to_string();
            self.entries_changed()?;
        }
        Ok(())
    }

    pub fn clear_results(&mut self) -> Result<()> {
        if self.is_spinning() || self.tab != Tab::Results {
            return Ok(());
        }
        if self.results.clear() {
            tracing::info!("results cleared");
            self.status_message = "Results cleared".to_string();
            self.save_results()?;
        }
        Ok(())
    }

    pub fn enter_edit_mode(&mut self) {
        if self.is_spinning() {
            return;
        }
        self.tab = Tab::Entries;
        self.editing = true;
    }

    pub fn exit_edit_mode(&mut self) {
        self.editing = false;
    }

    pub fn insert_char(&mut self, c: char) -> Result<()> {
        self.text.push(c);
        self.text_changed()
    }

    pub fn insert_newline(&mut self) -> Result<()> {
        self.text.push('\n');
        self.text_changed()
    }

    pub fn delete_char(&mut self) -> Result<()> {
        if self.text.pop().is_some() {
            self.text_changed()?;
        }
        Ok(())
    }

    fn text_changed(&mut self) -> Result<()> {
        if self.entries.sync_from_text(&self.text) {
            tracing::debug!(entries = self.entries.len(), "entries edited");
            self.save_entries()?;
        }
        Ok(())
    }

    /// The list changed through an action rather than typing: rewrite the text
    /// from the list and persist.
    fn entries_changed(&mut self) -> Result<()> {
        self.text = self.entries.to_text();
        self.save_entries()
    }

    fn save_entries(&mut self) -> Result<()> {
        store::save_entries(self.store.as_mut(), &self.entries).context("Failed to save entries")
    }

    fn save_results(&mut self) -> Result<()> {
        store::save_results(self.store.as_mut(), &self.results).context("Failed to save results")
    }
}
