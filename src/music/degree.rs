// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral scale degrees relative to a tonal center.
//!
//! Degrees are spelled against the major scale of the center; the five
//! chromatic distances use flat numerals (bII, bIII, bV, bVI, bVII).

use std::fmt;

use super::pitch::{normalize_pc, PitchClass};

/// Numeral for each semitone distance above the center
const DEGREE_NUMERALS: [&str; 12] = [
    "I", "bII", "II", "bIII", "III", "IV", "bV", "V", "bVI", "VI", "bVII", "VII",
];

/// Separator between a degree and a chord name in display strings
pub const DEGREE_SEPARATOR: &str = " — ";

/// Roman-numeral label of a chord root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegreeLabel {
    /// Quality-adjusted numeral, e.g. "V", "vi", "vii°"
    Numeral(String),
    /// Distance has no numeral; never shown next to a chord name
    Unknown,
}

impl DegreeLabel {
    pub fn is_unknown(&self) -> bool {
        matches!(self, DegreeLabel::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DegreeLabel::Numeral(s) => s,
            DegreeLabel::Unknown => "?",
        }
    }
}

impl fmt::Display for DegreeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bare numeral for a root relative to a center
pub fn numeral_for(root_pc: PitchClass, center_pc: PitchClass) -> Option<&'static str> {
    let distance = normalize_pc(root_pc as i32 - center_pc as i32);
    DEGREE_NUMERALS.get(distance as usize).copied()
}

/// Adjust a numeral for the chord quality implied by a suffix
pub fn apply_quality(numeral: &str, suffix: &str) -> String {
    let s = suffix.to_lowercase();
    let is_minor =
        (s.starts_with('m') && !s.starts_with("maj")) || s.contains("m7") || s.contains("m6");

    let mut label = if is_minor {
        numeral.to_lowercase()
    } else {
        numeral.to_string()
    };

    if s.contains("dim") || s.contains("m7b5") {
        label.push('°');
    }
    if s.contains("aug") {
        label.push('+');
    }
    label
}

/// Label a chord root as a scale degree of `center_pc`
pub fn label_degree(root_pc: PitchClass, suffix: &str, center_pc: PitchClass) -> DegreeLabel {
    match numeral_for(root_pc, center_pc) {
        Some(numeral) => DegreeLabel::Numeral(apply_quality(numeral, suffix)),
        None => DegreeLabel::Unknown,
    }
}

/// Prefix a chord name with its degree, e.g. "V — G".
///
/// Unknown degrees and empty names leave the name as is.
pub fn format_with_degree(label: &DegreeLabel, name: &str) -> String {
    match label {
        DegreeLabel::Numeral(numeral) if !name.is_empty() => {
            format!("{}{}{}", numeral, DEGREE_SEPARATOR, name)
        }
        _ => name.to_string(),
    }
}
