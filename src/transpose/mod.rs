// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Semitone transposition of the selection and, when linked, of the
//! chord memory and current bank.

pub mod engine;

pub use engine::{transpose, transpose_selection, LinkedBanks, Transposition};
