// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! chordbank: chord recognition, alternate voicings and a transposable
//! 12 x 12 chord memory.

pub mod chord;
pub mod config;
pub mod memory;
pub mod music;
pub mod session;
pub mod transpose;

pub use chord::{generate_alternates, recognize, AlternateChord, RecognizedChord};
pub use config::AppConfig;
pub use memory::MemoryStore;
pub use music::{NoteRange, PitchSet};
pub use session::{Session, SessionError};
