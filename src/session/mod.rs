// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session state for chordbank.
//!
//! A `Session` owns everything a caller edits: the selection, the playable
//! range, the chord memory, the current bank, the displayed chord name and
//! the undo history for applied alternates. Operations run to completion
//! and leave the state consistent; there is no hidden global state.

use std::collections::VecDeque;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};

use crate::chord::{generate_alternates, recognize, AlternateChord, RecognizedChord};
use crate::config::AppConfig;
use crate::memory::{
    import_json, ImportError, MemoryError, MemoryStore, PersistedState, SlotRef, StoredChord,
};
use crate::music::pitch::{
    normalize_pc, NoteNumber, NoteRange, PitchClass, PitchSet, Selection, Semitones,
};
use crate::transpose::{transpose, LinkedBanks};

/// Default number of undoable alternate applications
pub const DEFAULT_UNDO_DEPTH: usize = 5;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("nothing is selected")]
    EmptySelection,
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("import rejected: {0}")]
    Import(#[from] ImportError),
}

/// Caller-owned canonical state
#[derive(Debug, Clone)]
pub struct Session {
    selection: Selection,
    range: NoteRange,
    store: MemoryStore,
    current_bank: PitchClass,
    chord_name: String,
    undo: VecDeque<Selection>,
    undo_depth: usize,
    linked: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(NoteRange::piano())
    }
}

impl Session {
    /// Empty session on bank C with linked transposition
    pub fn new(range: NoteRange) -> Self {
        Self {
            selection: Selection::new(),
            range,
            store: MemoryStore::new(),
            current_bank: 0,
            chord_name: String::new(),
            undo: VecDeque::new(),
            undo_depth: DEFAULT_UNDO_DEPTH,
            linked: true,
        }
    }

    /// Session configured from application settings
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Self::new(config.note_range()?);
        session.undo_depth = config.undo_depth;
        session.linked = config.linked_transpose;
        Ok(session)
    }

    /// Replace the memory and current bank, re-wrapping stored notes into range
    pub fn with_memory(mut self, store: MemoryStore, current_bank: PitchClass) -> Self {
        self.store = store.rewrapped(self.range);
        self.store.reset_active();
        self.current_bank = current_bank % 12;
        self.refresh_name();
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected notes in ascending order
    pub fn notes(&self) -> Vec<NoteNumber> {
        self.selection.iter().copied().collect()
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn current_bank(&self) -> PitchClass {
        self.current_bank
    }

    pub fn active_slot(&self) -> Option<SlotRef> {
        self.store.active()
    }

    /// Name shown for the selection: a loaded slot's label, or the
    /// degree-annotated recognized name
    pub fn chord_name(&self) -> &str {
        &self.chord_name
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }

    /// Undo steps available
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    // ---- selection ----

    /// Toggle a note; returns true when it is now selected
    pub fn toggle_note(&mut self, note: NoteNumber) -> bool {
        let note = self.range.wrap(note);
        let selected = if self.selection.remove(&note) {
            false
        } else {
            self.selection.insert(note);
            true
        };
        self.manual_edit();
        selected
    }

    /// Replace the selection; notes are wrapped into range
    pub fn set_selection<I>(&mut self, notes: I)
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        let range = self.range;
        self.selection = notes.into_iter().map(|n| range.wrap(n)).collect();
        self.manual_edit();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.manual_edit();
    }

    fn manual_edit(&mut self) {
        self.store.reset_active();
        self.undo.clear();
        self.refresh_name();
    }

    fn refresh_name(&mut self) {
        if let Some(label) = self.active_label() {
            self.chord_name = label.to_string();
            return;
        }
        self.chord_name = self.display_name();
    }

    fn active_label(&self) -> Option<&str> {
        let active = self.store.active()?;
        let chord = self.store.get(active.bank, active.slot)?;
        Some(chord.label()).filter(|label| !label.is_empty())
    }

    // ---- recognition ----

    /// Recognize the current selection
    pub fn recognize(&self) -> Option<RecognizedChord> {
        recognize(&PitchSet::from_notes(self.selection.iter().copied()))
    }

    /// Recognized name prefixed with its degree in the current bank,
    /// e.g. "vi — Am"; empty when nothing is selected
    pub fn display_name(&self) -> String {
        self.recognize()
            .map(|chord| chord.display_name(self.current_bank))
            .unwrap_or_default()
    }

    // ---- alternates ----

    pub fn alternates(&self) -> Vec<AlternateChord> {
        let root = self.recognize().map(|chord| chord.root_pc);
        generate_alternates(&self.notes(), root, self.range)
    }

    /// Replace the selection with an alternate, remembering the old one
    pub fn apply_alternate(&mut self, alternate: &AlternateChord) {
        self.undo.push_back(self.selection.clone());
        while self.undo.len() > self.undo_depth {
            self.undo.pop_front();
        }

        let range = self.range;
        self.selection = alternate.notes.iter().map(|&n| range.wrap(n)).collect();
        self.refresh_name();
        debug!(name = %alternate.name, undo = self.undo.len(), "applied alternate");
    }

    /// Restore the selection from before the last applied alternate
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.selection = previous;
        self.refresh_name();
        true
    }

    // ---- transposition ----

    /// Shift the selection by `delta` semitones; when linked the memory
    /// rotates and the current bank advances with it
    pub fn transpose(&mut self, delta: Semitones) {
        let linked = self
            .linked
            .then(|| LinkedBanks::new(self.store.clone(), self.current_bank));
        let result = transpose(delta, &self.selection, self.range, linked);

        self.selection = result.selection;
        if let Some(banks) = result.linked {
            self.store = banks.store;
            self.current_bank = banks.current_bank;
        }
        self.store.reset_active();
        self.refresh_name();
        debug!(delta, bank = self.current_bank, linked = self.linked, "transposed");
    }

    // ---- banks ----

    /// Step the current bank without touching the memory
    pub fn change_bank(&mut self, step: i32) {
        self.set_bank(normalize_pc(self.current_bank as i32 + step.rem_euclid(12)));
    }

    pub fn set_bank(&mut self, bank: PitchClass) {
        self.current_bank = bank % 12;
        self.store.reset_active();
        self.refresh_name();
        debug!(bank = self.current_bank, "bank changed");
    }

    // ---- memory ----

    /// Label offered when saving: the active slot's label, else the
    /// recognized name
    pub fn suggested_label(&self) -> Option<String> {
        if let Some(label) = self.active_label() {
            return Some(label.to_string());
        }
        self.recognize().map(|chord| chord.name)
    }

    /// Save the selection into `slot` of the current bank.
    ///
    /// A blank label falls back to the recognized name. Returns the label
    /// that was stored.
    pub fn save_slot(&mut self, slot: usize, label: Option<&str>) -> Result<String, SessionError> {
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| self.recognize().map(|chord| chord.name))
            .unwrap_or_default();
        let notes = self.range.wrap_all(self.selection.iter().copied());

        self.store.save(self.current_bank, slot, &notes, &label)?;
        self.store.set_active(self.current_bank, slot)?;
        self.refresh_name();
        info!(bank = self.current_bank, slot, label = %label, "saved chord");
        Ok(label)
    }

    /// Load `slot` of the current bank into the selection; false when empty
    pub fn load_slot(&mut self, slot: usize) -> Result<bool, SessionError> {
        let Some(chord) = self.store.load(self.current_bank, slot, self.range)? else {
            return Ok(false);
        };

        self.selection = chord.notes().iter().copied().collect();
        self.undo.clear();
        self.store.set_active(self.current_bank, slot)?;
        self.refresh_name();
        debug!(bank = self.current_bank, slot, "loaded chord");
        Ok(true)
    }

    /// Empty `slot` of the current bank, returning what it held
    pub fn clear_slot(&mut self, slot: usize) -> Result<Option<StoredChord>, SessionError> {
        let removed = self.store.clear(self.current_bank, slot)?;
        if removed.is_some() {
            self.refresh_name();
            info!(bank = self.current_bank, slot, "cleared slot");
        }
        Ok(removed)
    }

    // ---- range ----

    /// Change the range, re-wrapping the selection and every stored chord
    pub fn set_range(&mut self, range: NoteRange) {
        self.range = range;
        self.selection = self.selection.iter().map(|&n| range.wrap(n)).collect();
        self.store = self.store.rewrapped(range);
        self.refresh_name();
        debug!(%range, "range changed");
    }

    // ---- persistence ----

    pub fn export_state(&self) -> PersistedState {
        PersistedState::capture(&self.store, self.current_bank)
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_state().to_json()
    }

    /// Replace the memory from JSON; on error nothing changes
    pub fn import_json(&mut self, json: &str) -> Result<(), SessionError> {
        let imported = import_json(json)?;
        self.store = imported.store.rewrapped(self.range);
        if let Some(bank) = imported.current_bank {
            self.current_bank = bank;
        }
        self.refresh_name();
        info!(
            filled = self.store.filled_count(),
            bank = self.current_bank,
            "imported chord banks"
        );
        Ok(())
    }
}
