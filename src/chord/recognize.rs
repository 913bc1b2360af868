// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord recognition from a set of pitch classes.
//!
//! Every pitch class in the set is tried as a root. The offsets of all
//! pitch classes from that root are compared against a fixed table of
//! interval patterns; a pattern matches when all of its offsets are
//! present, and extra notes cost two points each. The best-scoring
//! (root, pattern) pair names the chord, with 9/11/13 extensions, slash
//! bass and a hint for notes the name does not account for.

use crate::music::degree::{format_with_degree, label_degree, DegreeLabel};
use crate::music::interval::IntervalSet;
use crate::music::pitch::{describe_classes, note_name, PitchClass, PitchSet};

/// Named interval pattern with its priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordPattern {
    /// Suffix appended to the root name ("" for a major triad)
    pub suffix: &'static str,
    /// Required offsets from the root
    pub intervals: IntervalSet,
    /// Base score before the extra-note penalty
    pub priority: i32,
}

impl ChordPattern {
    const fn new(suffix: &'static str, offsets: &[u8], priority: i32) -> Self {
        Self {
            suffix,
            intervals: IntervalSet::from_offsets(offsets),
            priority,
        }
    }

    /// Number of notes the pattern requires
    pub fn note_count(&self) -> usize {
        self.intervals.len()
    }
}

/// Patterns in tie-break order
pub static PATTERNS: [ChordPattern; 15] = [
    ChordPattern::new("maj7", &[0, 4, 7, 11], 90),
    ChordPattern::new("7", &[0, 4, 7, 10], 88),
    ChordPattern::new("m7", &[0, 3, 7, 10], 87),
    ChordPattern::new("mMaj7", &[0, 3, 7, 11], 86),
    ChordPattern::new("dim7", &[0, 3, 6, 9], 85),
    ChordPattern::new("m7b5", &[0, 3, 6, 10], 84),
    ChordPattern::new("6", &[0, 4, 7, 9], 82),
    ChordPattern::new("m6", &[0, 3, 7, 9], 81),
    ChordPattern::new("", &[0, 4, 7], 75),
    ChordPattern::new("m", &[0, 3, 7], 74),
    ChordPattern::new("dim", &[0, 3, 6], 73),
    ChordPattern::new("aug", &[0, 4, 8], 72),
    ChordPattern::new("sus2", &[0, 2, 7], 71),
    ChordPattern::new("sus4", &[0, 5, 7], 70),
    ChordPattern::new("5", &[0, 7], 45),
];

/// Points lost for every pitch class beyond the pattern's own notes
const EXTRA_NOTE_PENALTY: i32 = 2;

/// Hint appended when the name leaves notes unexplained
pub const EXTRA_NOTES_HINT: &str = " (add)";

/// Best (root, pattern) pair for a pitch-class set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMatch {
    pub root_pc: PitchClass,
    pub pattern: &'static ChordPattern,
    /// Offsets of every pitch class in the set from the root
    pub relative: IntervalSet,
    pub score: i32,
}

impl ChordMatch {
    pub fn suffix(&self) -> &'static str {
        self.pattern.suffix
    }
}

/// Result of naming a set of notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedChord {
    /// Full display name, e.g. "C", "Am7", "C/E", "C-C#"
    pub name: String,
    /// Matched root, or the bass pitch class when nothing matched
    pub root_pc: PitchClass,
    /// Pattern suffix plus extension, without slash or hint
    pub suffix: String,
    pub bass_pc: PitchClass,
    /// `None` for single notes and unrecognized sets
    pub matched: Option<ChordMatch>,
}

impl RecognizedChord {
    /// True when the name is the hyphen-joined fallback
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none() && self.name.contains('-')
    }

    /// Degree of the root relative to a tonal center
    pub fn degree(&self, center_pc: PitchClass) -> DegreeLabel {
        label_degree(self.root_pc, &self.suffix, center_pc)
    }

    /// Name prefixed with its degree, e.g. "vi — Am"
    pub fn display_name(&self, center_pc: PitchClass) -> String {
        format_with_degree(&self.degree(center_pc), &self.name)
    }
}

/// Find the highest-scoring (root, pattern) pair; ties keep the first found
pub fn best_match(classes: &[PitchClass]) -> Option<ChordMatch> {
    let mut best: Option<ChordMatch> = None;

    for &root in classes {
        let relative = IntervalSet::relative_to(root, classes);

        for pattern in PATTERNS.iter() {
            if !relative.is_superset(pattern.intervals) {
                continue;
            }

            let extras = classes.len() as i32 - pattern.note_count() as i32;
            let score = pattern.priority - extras * EXTRA_NOTE_PENALTY;

            if best.map_or(true, |b| score > b.score) {
                best = Some(ChordMatch {
                    root_pc: root,
                    pattern,
                    relative,
                    score,
                });
            }
        }
    }

    best
}

/// Highest of 13, 11 and 9 present above the root
fn highest_extension(relative: IntervalSet) -> Option<u8> {
    if relative.contains(9) {
        Some(13)
    } else if relative.contains(5) {
        Some(11)
    } else if relative.contains(2) {
        Some(9)
    } else {
        None
    }
}

/// Combine a pattern suffix with the extension found above the root.
///
/// With a seventh present the extension number is appended as is
/// ("7" + 9 -> "79"); without one it becomes an "add" ("add9").
fn extended_suffix(base: &str, relative: IntervalSet) -> String {
    let Some(extension) = highest_extension(relative) else {
        return base.to_string();
    };

    if relative.contains_any(&[10, 11]) {
        format!("{}{}", base, extension)
    } else {
        format!("{}add{}", base, extension)
    }
}

/// Notes a name built from root, third and fifth accounts for
fn expected_note_count(relative: IntervalSet) -> usize {
    1 + relative.contains_any(&[3, 4]) as usize + relative.contains_any(&[6, 7, 8]) as usize
}

/// Name a pitch-class set whose lowest note has pitch class `bass_pc`.
///
/// `classes` may be in any order and contain duplicates. An empty slice
/// yields an empty name.
pub fn recognize_classes(classes: &[PitchClass], bass_pc: PitchClass) -> RecognizedChord {
    let bass_pc = bass_pc % 12;
    let mut pcs: Vec<PitchClass> = classes.iter().map(|&pc| pc % 12).collect();
    pcs.sort_unstable();
    pcs.dedup();

    if pcs.len() == 1 {
        return RecognizedChord {
            name: note_name(pcs[0]).to_string(),
            root_pc: pcs[0],
            suffix: String::new(),
            bass_pc,
            matched: None,
        };
    }

    let Some(found) = best_match(&pcs) else {
        return RecognizedChord {
            name: describe_classes(&pcs),
            root_pc: bass_pc,
            suffix: String::new(),
            bass_pc,
            matched: None,
        };
    };

    let suffix = extended_suffix(found.suffix(), found.relative);

    let mut name = format!("{}{}", note_name(found.root_pc), suffix);
    if bass_pc != found.root_pc {
        name.push('/');
        name.push_str(note_name(bass_pc));
    }

    let expected = expected_note_count(found.relative);
    if pcs.len() > (expected + 1).max(3) {
        name.push_str(EXTRA_NOTES_HINT);
    }

    RecognizedChord {
        name,
        root_pc: found.root_pc,
        suffix,
        bass_pc,
        matched: Some(found),
    }
}

/// Name the chord formed by a pitch set; `None` when the set is empty
pub fn recognize(set: &PitchSet) -> Option<RecognizedChord> {
    let bass_pc = set.bass_pc()?;
    Some(recognize_classes(set.classes(), bass_pc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(notes: &[i32]) -> String {
        recognize(&PitchSet::from_notes(notes.iter().copied()))
            .map(|c| c.name)
            .unwrap_or_default()
    }

    #[test]
    fn test_basic_triads_and_sevenths() {
        assert_eq!(recognize_classes(&[0, 4, 7], 0).name, "C");
        assert_eq!(recognize_classes(&[0, 3, 7], 0).name, "Cm");
        assert_eq!(recognize_classes(&[0, 4, 7, 11], 0).name, "Cmaj7");
        assert_eq!(recognize_classes(&[0, 4, 7, 10], 0).name, "C7");
    }

    #[test]
    fn test_single_pitch_class() {
        for pc in 0..12u8 {
            let chord = recognize_classes(&[pc], pc);
            assert_eq!(chord.name, note_name(pc));
            assert_eq!(chord.suffix, "");
            assert_eq!(chord.root_pc, pc);
        }
        // Octaves of the same note collapse to one pitch class
        assert_eq!(name_of(&[61, 73, 85]), "C#");
    }

    #[test]
    fn test_slash_bass() {
        // E in the bass under a C major triad
        assert_eq!(name_of(&[64, 67, 72]), "C/E");
        assert_eq!(name_of(&[59, 62, 65, 67]), "G7/B");
    }

    #[test]
    fn test_higher_priority_wins_between_roots() {
        // A-C-E-G reads as Am7 rather than C6
        let chord = recognize(&PitchSet::from_notes([57, 60, 64, 67])).unwrap();
        assert_eq!(chord.name, "Am7");
        assert_eq!(chord.root_pc, 9);
        assert_eq!(chord.suffix, "m7");
        assert_eq!(chord.matched.unwrap().score, 87);
    }

    #[test]
    fn test_extra_notes_are_penalized() {
        let found = best_match(&[0, 2, 4, 7]).unwrap();
        assert_eq!(found.root_pc, 0);
        assert_eq!(found.suffix(), "");
        assert_eq!(found.score, 73);
    }

    #[test]
    fn test_add_extensions_without_seventh() {
        assert_eq!(name_of(&[60, 62, 64, 67]), "Cadd9");
        assert_eq!(name_of(&[60, 64, 65, 67]), "Cadd11");
    }

    #[test]
    fn test_numbered_extension_with_seventh() {
        // Five pitch classes exceed the hint threshold as well
        let chord = recognize(&PitchSet::from_notes([60, 64, 67, 70, 74])).unwrap();
        assert_eq!(chord.suffix, "79");
        assert_eq!(chord.name, "C79 (add)");
        assert_eq!(chord.degree(0).to_string(), "I");
    }

    #[test]
    fn test_extension_appended_after_seventh() {
        assert_eq!(extended_suffix("maj7", IntervalSet::from_offsets(&[0, 2, 4, 7, 11])), "maj79");
        assert_eq!(extended_suffix("maj7", IntervalSet::from_offsets(&[0, 4, 7, 9, 11])), "maj713");
        assert_eq!(extended_suffix("m7", IntervalSet::from_offsets(&[0, 3, 5, 7, 10])), "m711");
        assert_eq!(extended_suffix("m7b5", IntervalSet::from_offsets(&[0, 2, 3, 6, 10])), "m7b59");
        assert_eq!(extended_suffix("6", IntervalSet::from_offsets(&[0, 4, 7, 9])), "6add13");
        assert_eq!(extended_suffix("", IntervalSet::from_offsets(&[0, 4, 7])), "");
    }

    #[test]
    fn test_highest_extension_only() {
        // 9 and 13 both present over C7: only 13 is named
        let chord = recognize_classes(&[0, 2, 4, 7, 9, 10], 0);
        assert_eq!(chord.suffix, "713");
    }

    #[test]
    fn test_symmetric_chords_keep_lowest_root() {
        assert_eq!(recognize_classes(&[0, 4, 8], 0).name, "Caug");
        assert_eq!(recognize_classes(&[8, 4, 0], 4).name, "Caug/E");

        let dim7 = recognize_classes(&[0, 3, 6, 9], 0);
        assert_eq!(dim7.root_pc, 0);
        assert_eq!(dim7.suffix, "dim7add13");
        assert_eq!(dim7.name, "Cdim7add13");
    }

    #[test]
    fn test_bass_reduced_to_pitch_class() {
        let chord = recognize_classes(&[0, 4, 7], 12);
        assert_eq!(chord.name, "C");
        assert_eq!(chord.bass_pc, 0);
        assert_eq!(recognize_classes(&[0, 4, 7], 16).name, "C/E");
    }

    #[test]
    fn test_power_chord() {
        assert_eq!(name_of(&[48, 55]), "C5");
        assert_eq!(name_of(&[55, 60]), "C5/G");
    }

    #[test]
    fn test_unmatched_falls_back_to_names() {
        let chord = recognize(&PitchSet::from_notes([62, 60, 61])).unwrap();
        assert_eq!(chord.name, "C-C#-D");
        assert_eq!(chord.root_pc, 0);
        assert_eq!(chord.suffix, "");
        assert!(chord.matched.is_none());
        assert!(chord.is_fallback());
    }

    #[test]
    fn test_empty_set_has_no_chord() {
        assert!(recognize(&PitchSet::default()).is_none());
        assert_eq!(recognize_classes(&[], 0).name, "");
    }

    #[test]
    fn test_display_name_with_degree() {
        let g = recognize_classes(&[7, 11, 2], 7);
        assert_eq!(g.display_name(0), "V — G");

        let am = recognize_classes(&[9, 0, 4], 9);
        assert_eq!(am.display_name(0), "vi — Am");
    }

    #[test]
    fn test_recognition_is_order_independent() {
        let a = recognize_classes(&[7, 0, 4, 4], 0);
        let b = recognize_classes(&[0, 4, 7], 0);
        assert_eq!(a, b);
    }
}
