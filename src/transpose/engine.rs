// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use crate::memory::MemoryStore;
use crate::music::pitch::{normalize_pc, NoteRange, PitchClass, Selection, Semitones};

/// Memory store and current bank carried along by a linked transposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedBanks {
    pub store: MemoryStore,
    pub current_bank: PitchClass,
}

impl LinkedBanks {
    pub fn new(store: MemoryStore, current_bank: PitchClass) -> Self {
        Self {
            store,
            current_bank: current_bank % 12,
        }
    }

    /// Rotate the store and advance the bank by `delta`
    pub fn shifted(&self, delta: Semitones, range: NoteRange) -> Self {
        Self {
            store: self.store.rotated(delta, range),
            current_bank: normalize_pc(self.current_bank as i32 + delta.rem_euclid(12)),
        }
    }
}

/// Result of a transposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transposition {
    pub selection: Selection,
    /// Present only when banks were passed in
    pub linked: Option<LinkedBanks>,
}

/// Shift every selected note by `delta` and wrap it into `range`.
///
/// Notes that collide after wrapping collapse into one.
pub fn transpose_selection(delta: Semitones, selection: &Selection, range: NoteRange) -> Selection {
    selection.iter().map(|&n| range.wrap_shifted(n, delta)).collect()
}

/// Transpose the selection, and the banks when linked.
///
/// An empty selection stays empty, but linked banks still rotate and the
/// current bank still advances.
pub fn transpose(
    delta: Semitones,
    selection: &Selection,
    range: NoteRange,
    linked: Option<LinkedBanks>,
) -> Transposition {
    Transposition {
        selection: transpose_selection(delta, selection, range),
        linked: linked.map(|banks| banks.shifted(delta, range)),
    }
}
