// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Semitone offsets relative to a root, stored as a 12-bit mask.

use std::fmt;

use super::pitch::{normalize_pc, PitchClass};

/// Set of semitone offsets (0-11) above a root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntervalSet(u16);

impl IntervalSet {
    pub const EMPTY: IntervalSet = IntervalSet(0);

    /// Build from offsets; values are reduced modulo 12
    pub const fn from_offsets(offsets: &[u8]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < offsets.len() {
            bits |= 1 << (offsets[i] % 12);
            i += 1;
        }
        IntervalSet(bits)
    }

    /// Offsets of every pitch class measured upward from `root`
    pub fn relative_to(root: PitchClass, classes: &[PitchClass]) -> Self {
        classes.iter().fold(Self::EMPTY, |set, &pc| {
            set.with(normalize_pc(pc as i32 - root as i32))
        })
    }

    /// Copy of this set with one more offset
    pub fn with(self, offset: u8) -> Self {
        IntervalSet(self.0 | 1 << (offset % 12))
    }

    pub fn contains(self, offset: u8) -> bool {
        offset < 12 && self.0 & (1 << offset) != 0
    }

    /// True if at least one of the offsets is present
    pub fn contains_any(self, offsets: &[u8]) -> bool {
        offsets.iter().any(|&o| self.contains(o))
    }

    /// True if every offset of `other` is present here
    pub fn is_superset(self, other: IntervalSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Offsets in ascending order
    pub fn offsets(self) -> impl Iterator<Item = u8> {
        (0..12u8).filter(move |&o| self.contains(o))
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.offsets().map(|o| o.to_string()).collect();
        write!(f, "[{}]", parts.join(","))
    }
}
