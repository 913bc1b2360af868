// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord naming and alternate suggestions.
//!
//! Recognition is a pure function of the pitch-class set and the bass
//! note; the detected root and suffix are returned with the name rather
//! than kept as shared state.

pub mod alternates;
pub mod recognize;

pub use alternates::{generate_alternates, AlternateChord, AlternateKind};
pub use recognize::{
    best_match, recognize, recognize_classes, ChordMatch, ChordPattern, RecognizedChord, PATTERNS,
};
