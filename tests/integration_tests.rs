// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for chordbank
//!
//! These tests verify that multiple components work together correctly.

use chordbank::chord::{generate_alternates, recognize, AlternateKind};
use chordbank::config::AppConfig;
use chordbank::memory::{import_json, load_state_file, save_state_file, MemoryStore};
use chordbank::music::{label_degree, NoteRange, PitchSet};
use chordbank::session::Session;
use chordbank::transpose::{transpose, LinkedBanks};
use tempfile::tempdir;

fn pitch_set(notes: &[i32]) -> PitchSet {
    PitchSet::from_notes(notes.iter().copied())
}

/// Recognize, label, suggest, save, transpose, export and import
#[test]
fn test_full_workflow() {
    let mut session = Session::default();
    session.set_selection([57, 60, 64]);

    let chord = session.recognize().unwrap();
    assert_eq!(chord.name, "Am");
    assert_eq!(session.chord_name(), "vi — Am");

    let relative = session
        .alternates()
        .into_iter()
        .find(|a| a.kind == AlternateKind::RelativeMajor)
        .unwrap();
    session.apply_alternate(&relative);
    assert_eq!(session.chord_name(), "I — C");

    session.save_slot(0, None).unwrap();
    session.transpose(7);
    assert_eq!(session.current_bank(), 7);
    assert_eq!(session.chord_name(), "I — G");
    assert_eq!(session.store().get(7, 0).unwrap().label(), "C");

    let json = session.export_json().unwrap();
    let mut restored = Session::default();
    restored.import_json(&json).unwrap();
    assert_eq!(restored.current_bank(), 7);
    assert!(restored.load_slot(0).unwrap());
    assert_eq!(restored.notes(), session.notes());
}

/// Degree labels agree with recognition for every diatonic triad in C
#[test]
fn test_diatonic_triads_in_c() {
    let triads: [(&[i32], &str, &str); 7] = [
        (&[60, 64, 67], "C", "I"),
        (&[62, 65, 69], "Dm", "ii"),
        (&[64, 67, 71], "Em", "iii"),
        (&[65, 69, 72], "F", "IV"),
        (&[67, 71, 74], "G", "V"),
        (&[69, 72, 76], "Am", "vi"),
        (&[71, 74, 77], "Bdim", "VII°"),
    ];

    for (notes, name, numeral) in triads {
        let chord = recognize(&pitch_set(notes)).unwrap();
        assert_eq!(chord.name, name);
        assert_eq!(label_degree(chord.root_pc, &chord.suffix, 0).as_str(), numeral);
    }
}

/// Every alternate lies inside the range and is itself recognizable
#[test]
fn test_alternates_stay_in_range() {
    let range = NoteRange::new(48, 84).unwrap();
    for notes in [&[60, 64, 67][..], &[62, 65, 69, 72], &[55, 59, 62, 65], &[83, 86, 90]] {
        let root = recognize(&pitch_set(notes)).map(|c| c.root_pc);
        for alt in generate_alternates(notes, root, range) {
            assert!(alt.notes.iter().all(|&n| range.contains(n)), "{}", alt.name);
            assert!(alt.notes.windows(2).all(|w| w[0] < w[1]), "{}", alt.name);
            assert!(recognize(&pitch_set(&alt.notes)).is_some());
        }
    }
}

/// Twelve single-semitone steps bring selection, memory and bank back
#[test]
fn test_twelve_steps_return_home() {
    let range = NoteRange::piano();
    let mut store = MemoryStore::new();
    store.save(0, 0, &[60, 64, 67], "C").unwrap();
    store.save(5, 3, &[53, 57, 60, 63], "F7").unwrap();

    let start: chordbank::music::Selection = [60, 64, 67].into_iter().collect();
    let mut selection = start.clone();
    let mut banks = LinkedBanks::new(store.clone(), 0);
    for _ in 0..12 {
        let step = transpose(1, &selection, range, Some(banks));
        selection = step.selection;
        banks = step.linked.unwrap();
    }

    assert_eq!(banks.current_bank, 0);
    assert_eq!(banks.store.get(0, 0).unwrap().label(), "C");
    assert_eq!(banks.store.get(5, 3).unwrap().label(), "F7");
    // An octave up, no wrap needed
    assert_eq!(selection.iter().copied().collect::<Vec<_>>(), vec![72, 76, 79]);
}

/// A config file drives the session and the state file round trip
#[test]
fn test_config_and_state_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("chordbank.toml");
    let state_path = dir.path().join("banks.json");

    std::fs::write(
        &config_path,
        format!(
            "linked_transpose = false\nstate_file = {:?}\n\n[range]\nmin = 48\nmax = 83\n",
            state_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    assert_eq!(config.state_file.as_deref(), Some(state_path.as_path()));

    let (store, bank) = load_state_file(&state_path).unwrap();
    let mut session = Session::from_config(&config).unwrap().with_memory(store, bank);
    session.set_selection([36, 40, 43]);
    assert_eq!(session.notes(), vec![48, 52, 55]);
    session.save_slot(11, Some("Low C")).unwrap();
    session.transpose(1);
    assert_eq!(session.current_bank(), 0);
    save_state_file(&state_path, session.store(), session.current_bank()).unwrap();

    let (store, bank) = load_state_file(&state_path).unwrap();
    assert_eq!(bank, 0);
    assert_eq!(store.get(0, 11).unwrap().notes(), &[48, 52, 55]);
}

/// A rejected import leaves the session untouched
#[test]
fn test_rejected_import_is_atomic() {
    let mut session = Session::default();
    session.set_selection([60, 64, 67]);
    session.save_slot(0, None).unwrap();
    let before = session.export_json().unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&before).unwrap();
    value["bankChords"][3] = serde_json::json!([null, null]);
    assert!(import_json(&value.to_string()).is_err());
    assert!(session.import_json(&value.to_string()).is_err());
    assert_eq!(session.export_json().unwrap(), before);
}
