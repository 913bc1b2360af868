// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord memory for chordbank.
//!
//! Twelve banks (one per tonal center) of twelve slots each, with
//! rotation under transposition and a JSON persistence contract.

pub mod persist;
pub mod store;

pub use persist::{
    import_json, load_state_file, save_state_file, ImportError, ImportedState, PersistedChord,
    PersistedState,
};
pub use store::{MemoryError, MemoryStore, SlotRef, StoredChord, BANK_COUNT, SLOT_COUNT};
