// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes, note numbers and the playable range.
//!
//! Note numbers are absolute and may be any integer. Pitch classes are
//! always reduced into 0-11 and spelled with sharps only.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute note number (MIDI convention, middle C = 60)
pub type NoteNumber = i32;

/// Pitch class (0 = C ... 11 = B)
pub type PitchClass = u8;

/// Semitone offset type
pub type Semitones = i32;

/// The live working set of notes
pub type Selection = BTreeSet<NoteNumber>;

/// Lowest key of an 88-key piano (A0)
pub const PIANO_LOW: NoteNumber = 21;

/// Highest key of an 88-key piano (C8)
pub const PIANO_HIGH: NoteNumber = 108;

/// Reduce a note number to its pitch class
pub fn pitch_class(note: NoteNumber) -> PitchClass {
    note.rem_euclid(12) as PitchClass
}

/// Reduce any semitone value into 0-11
pub fn normalize_pc(value: i32) -> PitchClass {
    value.rem_euclid(12) as PitchClass
}

/// Sharp spelling of a pitch class
pub fn note_name(pc: PitchClass) -> &'static str {
    Note::from_pitch_class(pc).name()
}

/// Note name with octave, e.g. 60 -> "C4"
pub fn note_label(note: NoteNumber) -> String {
    let octave = note.div_euclid(12) - 1;
    format!("{}{}", note_name(pitch_class(note)), octave)
}

/// Parse a note number ("60") or a labeled note ("C4", "F#3", "A-1")
pub fn parse_note_number(s: &str) -> Result<NoteNumber, ParseNoteError> {
    let s = s.trim();
    if let Ok(n) = s.parse::<NoteNumber>() {
        return Ok(n);
    }

    let split = s
        .find(|c: char| c == '-' || c.is_ascii_digit())
        .ok_or_else(|| ParseNoteError(s.to_string()))?;
    let (name, octave) = s.split_at(split);
    let note: Note = name.parse()?;
    let octave: NoteNumber = octave.parse().map_err(|_| ParseNoteError(s.to_string()))?;
    octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|n| n.checked_add(note.pitch_class() as NoteNumber))
        .ok_or_else(|| ParseNoteError(s.to_string()))
}

/// Note names (pitch classes), sharp spelling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> PitchClass {
        self as PitchClass
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: PitchClass) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Display name with sharp spelling
    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        Note::from_pitch_class(normalize_pc(self.pitch_class() as i32 + semitones.rem_euclid(12)))
    }

    /// Get interval in semitones to another note (ascending)
    pub fn interval_to(self, other: Note) -> u8 {
        normalize_pc(other.pitch_class() as i32 - self.pitch_class() as i32)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a note name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown note name: {0:?} (expected C, C#, D ... B)")]
pub struct ParseNoteError(pub String);

impl FromStr for Note {
    type Err = ParseNoteError;

    /// Parse a sharp-spelled note ("C", "C#", "Cs"); flats are not accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let note = match upper.as_str() {
            "C" => Note::C,
            "C#" | "CS" => Note::Cs,
            "D" => Note::D,
            "D#" | "DS" => Note::Ds,
            "E" => Note::E,
            "F" => Note::F,
            "F#" | "FS" => Note::Fs,
            "G" => Note::G,
            "G#" | "GS" => Note::Gs,
            "A" => Note::A,
            "A#" | "AS" => Note::As,
            "B" => Note::B,
            _ => return Err(ParseNoteError(s.to_string())),
        };
        Ok(note)
    }
}

/// Error returned for an empty range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid note range: min {min} is above max {max}")]
pub struct RangeError {
    pub min: NoteNumber,
    pub max: NoteNumber,
}

/// Closed interval of valid note numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteRange {
    min: NoteNumber,
    max: NoteNumber,
}

impl NoteRange {
    /// Create a range; `min` must not exceed `max`
    pub fn new(min: NoteNumber, max: NoteNumber) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Full 88-key piano range (A0..=C8)
    pub fn piano() -> Self {
        Self {
            min: PIANO_LOW,
            max: PIANO_HIGH,
        }
    }

    pub fn min(&self) -> NoteNumber {
        self.min
    }

    pub fn max(&self) -> NoteNumber {
        self.max
    }

    /// Check if a note lies inside the range
    pub fn contains(&self, note: NoteNumber) -> bool {
        (self.min..=self.max).contains(&note)
    }

    /// Move a note by whole octaves until it lies in the range.
    ///
    /// Raises by octaves while below `min`, then lowers by octaves while
    /// above `max`. For ranges narrower than an octave a note may end up
    /// below `min`; the result is still deterministic and octave-equivalent.
    pub fn wrap(&self, note: NoteNumber) -> NoteNumber {
        self.wrap_wide(note as i64)
    }

    /// Shift a note by `delta` semitones, then wrap it.
    ///
    /// The sum is taken in `i64`, so extreme notes and deltas never overflow.
    pub fn wrap_shifted(&self, note: NoteNumber, delta: Semitones) -> NoteNumber {
        self.wrap_wide(note as i64 + delta as i64)
    }

    pub(crate) fn wrap_wide(&self, mut n: i64) -> NoteNumber {
        let (min, max) = (self.min as i64, self.max as i64);
        if n < min {
            n += 12 * (min - n + 11).div_euclid(12);
        }
        if n > max {
            n -= 12 * (n - max + 11).div_euclid(12);
        }
        n as NoteNumber
    }

    /// Wrap every note and return them deduplicated in ascending order
    pub fn wrap_all<I>(&self, notes: I) -> Vec<NoteNumber>
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        let wrapped: BTreeSet<NoteNumber> = notes.into_iter().map(|n| self.wrap(n)).collect();
        wrapped.into_iter().collect()
    }
}

impl Default for NoteRange {
    fn default() -> Self {
        Self::piano()
    }
}

impl fmt::Display for NoteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", note_label(self.min), note_label(self.max))
    }
}

/// A normalized view of a collection of played notes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PitchSet {
    notes: Vec<NoteNumber>,
    classes: Vec<PitchClass>,
}

impl PitchSet {
    /// Build from any collection of note numbers (duplicates allowed)
    pub fn from_notes<I>(notes: I) -> Self
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        let notes: BTreeSet<NoteNumber> = notes.into_iter().collect();
        let classes: BTreeSet<PitchClass> = notes.iter().map(|&n| pitch_class(n)).collect();
        Self {
            notes: notes.into_iter().collect(),
            classes: classes.into_iter().collect(),
        }
    }

    /// Ascending, deduplicated note numbers
    pub fn notes(&self) -> &[NoteNumber] {
        &self.notes
    }

    /// Ascending, deduplicated pitch classes
    pub fn classes(&self) -> &[PitchClass] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Number of distinct pitch classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Lowest note
    pub fn bass(&self) -> Option<NoteNumber> {
        self.notes.first().copied()
    }

    /// Pitch class of the lowest note
    pub fn bass_pc(&self) -> Option<PitchClass> {
        self.bass().map(pitch_class)
    }

    /// Hyphen-joined pitch-class names, e.g. "C-E-G"
    pub fn describe(&self) -> String {
        describe_classes(&self.classes)
    }
}

impl FromIterator<NoteNumber> for PitchSet {
    fn from_iter<I: IntoIterator<Item = NoteNumber>>(iter: I) -> Self {
        PitchSet::from_notes(iter)
    }
}

pub(crate) fn describe_classes(classes: &[PitchClass]) -> String {
    classes
        .iter()
        .map(|&pc| note_name(pc))
        .collect::<Vec<_>>()
        .join("-")
}
