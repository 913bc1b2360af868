// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory primitives for chordbank.
//!
//! This module provides pitch classes and note numbers, the playable
//! range with octave wrap-around, interval sets and roman-numeral
//! degree labeling.

pub mod degree;
pub mod interval;
pub mod pitch;

pub use degree::{format_with_degree, label_degree, DegreeLabel};
pub use interval::IntervalSet;
pub use pitch::{
    normalize_pc, note_label, note_name, parse_note_number, pitch_class, Note, NoteNumber,
    NoteRange, ParseNoteError, PitchClass, PitchSet, RangeError, Selection, Semitones,
};
