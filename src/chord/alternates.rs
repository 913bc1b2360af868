// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Alternate chord suggestions for a selection.
//!
//! Given the selected notes and the detected root, suggests inversions,
//! sixth and seventh chords, suspensions, ninth/eleventh extensions and
//! the relative and parallel major/minor triads. Every candidate is
//! voiced from the lowest selected root note and wrapped into the range.

use crate::music::interval::IntervalSet;
use crate::music::pitch::{pitch_class, Note, NoteNumber, NoteRange, PitchClass, PitchSet};

/// Kind of alternate suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlternateKind {
    FirstInversion,
    SecondInversion,
    MajorSeventh,
    DominantSeventh,
    MajorSixth,
    MinorSeventh,
    MinorMajorSeventh,
    MinorSixth,
    Sus4,
    Sus2,
    Ninth,
    Eleventh,
    RelativeMinor,
    RelativeMajor,
    ParallelMinor,
    ParallelMajor,
}

impl AlternateKind {
    /// Short human description
    pub fn description(self) -> &'static str {
        match self {
            AlternateKind::FirstInversion => "First inversion (3rd in bass)",
            AlternateKind::SecondInversion => "Second inversion (5th in bass)",
            AlternateKind::MajorSeventh => "Add major 7th",
            AlternateKind::DominantSeventh => "Add dominant 7th",
            AlternateKind::MajorSixth => "Add major 6th",
            AlternateKind::MinorSeventh => "Add minor 7th",
            AlternateKind::MinorMajorSeventh => "Add major 7th",
            AlternateKind::MinorSixth => "Add major 6th",
            AlternateKind::Sus4 => "Replace 3rd with 4th",
            AlternateKind::Sus2 => "Replace 3rd with 2nd",
            AlternateKind::Ninth => "Add 9th extension",
            AlternateKind::Eleventh => "Add 11th extension",
            AlternateKind::RelativeMinor => "Relative minor (shares notes)",
            AlternateKind::RelativeMajor => "Relative major (shares notes)",
            AlternateKind::ParallelMinor => "Parallel minor (same root)",
            AlternateKind::ParallelMajor => "Parallel major (same root)",
        }
    }
}

/// A suggested replacement for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateChord {
    /// Ascending, deduplicated, wrapped into the range
    pub notes: Vec<NoteNumber>,
    pub name: String,
    pub description: &'static str,
    pub kind: AlternateKind,
}

/// Collects candidates voiced inside one range
struct Candidates {
    range: NoteRange,
    list: Vec<AlternateChord>,
}

impl Candidates {
    /// `root` is widened so voicings built on extreme notes cannot overflow
    fn push(&mut self, kind: AlternateKind, root: i64, offsets: &[i64], name: String) {
        let mut notes: Vec<NoteNumber> = offsets
            .iter()
            .map(|&o| self.range.wrap_wide(root + o))
            .collect();
        notes.sort_unstable();
        notes.dedup();
        self.list.push(AlternateChord {
            notes,
            name,
            description: kind.description(),
            kind,
        });
    }
}

/// Suggest alternates for `notes`.
///
/// `detected_root` is the recognized root pitch class; without one the
/// bass pitch class is used. Fewer than two distinct pitch classes yield
/// no suggestions.
pub fn generate_alternates(
    notes: &[NoteNumber],
    detected_root: Option<PitchClass>,
    range: NoteRange,
) -> Vec<AlternateChord> {
    let set = PitchSet::from_notes(notes.iter().copied());
    if set.class_count() < 2 {
        return Vec::new();
    }
    let Some(bass) = set.bass() else {
        return Vec::new();
    };

    let bass_note = Note::from_pitch_class(pitch_class(bass));
    let root_note = detected_root.map_or(bass_note, Note::from_pitch_class);
    let root_pc = root_note.pitch_class();

    // Lowest selected note with the root pitch class, else the root above the bass
    let root = set
        .notes()
        .iter()
        .copied()
        .find(|&n| pitch_class(n) == root_pc)
        .map_or_else(
            || bass as i64 + bass_note.interval_to(root_note) as i64,
            |n| n as i64,
        );

    let rel = IntervalSet::relative_to(root_pc, set.classes());
    let is_major = rel.contains(4);
    let is_minor = rel.contains(3);
    let has_third = is_major || is_minor;
    let has_fifth = rel.contains(7);
    let seventh = if rel.contains(11) {
        Some(11)
    } else if rel.contains(10) {
        Some(10)
    } else {
        None
    };

    let name = root_note.name();
    let mut out = Candidates {
        range,
        list: Vec::new(),
    };

    if set.class_count() >= 3 && has_third && has_fifth {
        let third = if is_major { 4 } else { 3 };
        let quality = if is_major { "" } else { "m" };
        out.push(
            AlternateKind::FirstInversion,
            root,
            &[third, 7, 12],
            format!("{}{}/1st", name, quality),
        );
        out.push(
            AlternateKind::SecondInversion,
            root,
            &[7, 12, 12 + third],
            format!("{}{}/2nd", name, quality),
        );
    }

    if is_major && seventh.is_none() {
        out.push(AlternateKind::MajorSeventh, root, &[0, 4, 7, 11], format!("{}maj7", name));
        out.push(AlternateKind::DominantSeventh, root, &[0, 4, 7, 10], format!("{}7", name));
        out.push(AlternateKind::MajorSixth, root, &[0, 4, 7, 9], format!("{}6", name));
    }

    if is_minor && seventh.is_none() {
        out.push(AlternateKind::MinorSeventh, root, &[0, 3, 7, 10], format!("{}m7", name));
        out.push(AlternateKind::MinorMajorSeventh, root, &[0, 3, 7, 11], format!("{}mMaj7", name));
        out.push(AlternateKind::MinorSixth, root, &[0, 3, 7, 9], format!("{}m6", name));
    }

    if has_third && has_fifth {
        out.push(AlternateKind::Sus4, root, &[0, 5, 7], format!("{}sus4", name));
        out.push(AlternateKind::Sus2, root, &[0, 2, 7], format!("{}sus2", name));
    }

    if let Some(seventh) = seventh {
        // No third present: voice as major
        let third = if is_major || !is_minor { 4 } else { 3 };
        let quality = match (is_minor && !is_major, seventh) {
            (true, 11) => "mMaj",
            (true, _) => "m",
            (false, 11) => "maj",
            (false, _) => "",
        };
        out.push(
            AlternateKind::Ninth,
            root,
            &[0, third, 7, seventh, 14],
            format!("{}{}9", name, quality),
        );
        out.push(
            AlternateKind::Eleventh,
            root,
            &[0, third, 7, seventh, 17],
            format!("{}{}11", name, quality),
        );
    }

    if is_major && has_fifth {
        out.push(
            AlternateKind::RelativeMinor,
            range.wrap_wide(root - 3) as i64,
            &[0, 3, 7],
            format!("{}m", root_note.transpose(-3)),
        );
        out.push(AlternateKind::ParallelMinor, root, &[0, 3, 7], format!("{}m", name));
    } else if is_minor && has_fifth {
        out.push(
            AlternateKind::RelativeMajor,
            range.wrap_wide(root + 3) as i64,
            &[0, 4, 7],
            root_note.transpose(3).to_string(),
        );
        out.push(AlternateKind::ParallelMajor, root, &[0, 4, 7], name.to_string());
    }

    out.list
}
