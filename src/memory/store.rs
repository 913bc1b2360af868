// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The 12 x 12 chord memory.
//!
//! One bank per tonal center (pitch class), twelve slots per bank. The
//! grid is always complete; empty slots are explicit `None`.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::music::pitch::{normalize_pc, NoteNumber, NoteRange, PitchClass, Semitones};

/// Number of banks (one per pitch class)
pub const BANK_COUNT: usize = 12;

/// Slots per bank
pub const SLOT_COUNT: usize = 12;

/// One bank's slots
pub type Bank = [Option<StoredChord>; SLOT_COUNT];

/// Errors for out-of-range addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("bank {0} is out of range (expected 0-11)")]
    BankOutOfRange(PitchClass),
    #[error("slot {0} is out of range (expected 0-11)")]
    SlotOutOfRange(usize),
}

/// A saved chord: notes plus a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChord {
    notes: Vec<NoteNumber>,
    label: String,
}

impl StoredChord {
    /// Create a chord; notes are deduplicated and sorted ascending
    pub fn new<I>(notes: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        let mut notes: Vec<NoteNumber> = notes.into_iter().collect();
        notes.sort_unstable();
        notes.dedup();
        Self {
            notes,
            label: label.into(),
        }
    }

    pub fn notes(&self) -> &[NoteNumber] {
        &self.notes
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Copy with every note wrapped into `range`
    pub fn wrapped(&self, range: NoteRange) -> Self {
        Self {
            notes: range.wrap_all(self.notes.iter().copied()),
            label: self.label.clone(),
        }
    }

    /// Copy shifted by `delta` semitones, then wrapped into `range`
    pub fn shifted(&self, delta: Semitones, range: NoteRange) -> Self {
        Self {
            notes: self
                .notes
                .iter()
                .map(|&n| range.wrap_shifted(n, delta))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            label: self.label.clone(),
        }
    }
}

/// Address of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub bank: PitchClass,
    pub slot: usize,
}

/// The bank/slot grid plus the active-slot pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    banks: [Bank; BANK_COUNT],
    active: Option<SlotRef>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            banks: std::array::from_fn(|_| std::array::from_fn(|_| None)),
            active: None,
        }
    }
}

fn check(bank: PitchClass, slot: usize) -> Result<(usize, usize), MemoryError> {
    if bank as usize >= BANK_COUNT {
        return Err(MemoryError::BankOutOfRange(bank));
    }
    if slot >= SLOT_COUNT {
        return Err(MemoryError::SlotOutOfRange(slot));
    }
    Ok((bank as usize, slot))
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_banks(banks: [Bank; BANK_COUNT]) -> Self {
        Self {
            banks,
            active: None,
        }
    }

    /// Overwrite a slot
    pub fn save(
        &mut self,
        bank: PitchClass,
        slot: usize,
        notes: &[NoteNumber],
        label: &str,
    ) -> Result<(), MemoryError> {
        let (b, s) = check(bank, slot)?;
        self.banks[b][s] = Some(StoredChord::new(notes.iter().copied(), label));
        Ok(())
    }

    /// Copy of a slot with its notes wrapped into the current range
    pub fn load(
        &self,
        bank: PitchClass,
        slot: usize,
        range: NoteRange,
    ) -> Result<Option<StoredChord>, MemoryError> {
        let (b, s) = check(bank, slot)?;
        Ok(self.banks[b][s].as_ref().map(|chord| chord.wrapped(range)))
    }

    /// Empty a slot, returning what it held
    pub fn clear(&mut self, bank: PitchClass, slot: usize) -> Result<Option<StoredChord>, MemoryError> {
        let (b, s) = check(bank, slot)?;
        if self.active == Some(SlotRef { bank, slot }) {
            self.active = None;
        }
        Ok(self.banks[b][s].take())
    }

    /// Stored chord as saved, without wrapping
    pub fn get(&self, bank: PitchClass, slot: usize) -> Option<&StoredChord> {
        let (b, s) = check(bank, slot).ok()?;
        self.banks[b][s].as_ref()
    }

    /// All slots of one bank
    pub fn bank(&self, bank: PitchClass) -> Option<&Bank> {
        self.banks.get(bank as usize)
    }

    pub fn banks(&self) -> &[Bank; BANK_COUNT] {
        &self.banks
    }

    /// Filled slots in bank-then-slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotRef, &StoredChord)> {
        self.banks.iter().enumerate().flat_map(|(b, bank)| {
            bank.iter().enumerate().filter_map(move |(s, slot)| {
                slot.as_ref().map(|chord| {
                    (
                        SlotRef {
                            bank: b as PitchClass,
                            slot: s,
                        },
                        chord,
                    )
                })
            })
        })
    }

    pub fn filled_count(&self) -> usize {
        self.iter().count()
    }

    pub fn active(&self) -> Option<SlotRef> {
        self.active
    }

    pub fn set_active(&mut self, bank: PitchClass, slot: usize) -> Result<(), MemoryError> {
        check(bank, slot)?;
        self.active = Some(SlotRef { bank, slot });
        Ok(())
    }

    pub fn reset_active(&mut self) {
        self.active = None;
    }

    /// Rotate the whole grid by `delta` semitones.
    ///
    /// Bank `b` moves to bank `(b + delta) mod 12` keeping slot positions,
    /// and every stored note is shifted by `delta` and wrapped into
    /// `range`. The active-slot pointer is reset.
    pub fn rotated(&self, delta: Semitones, range: NoteRange) -> Self {
        let mut next = MemoryStore::new();
        for (from, bank) in self.banks.iter().enumerate() {
            let to = normalize_pc(from as i32 + delta.rem_euclid(12)) as usize;
            for (slot, chord) in bank.iter().enumerate() {
                next.banks[to][slot] = chord.as_ref().map(|c| c.shifted(delta, range));
            }
        }
        next
    }

    /// Copy with every stored chord wrapped into `range`
    pub fn rewrapped(&self, range: NoteRange) -> Self {
        let mut next = self.clone();
        for slot in next.banks.iter_mut().flatten() {
            if let Some(chord) = slot {
                *chord = chord.wrapped(range);
            }
        }
        next
    }
}
