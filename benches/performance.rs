// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for chordbank
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Chord recognition over the pattern table
//! - Alternate generation
//! - Whole-memory rotation and JSON export/import

use chordbank::chord::{best_match, generate_alternates, recognize};
use chordbank::memory::{import_json, MemoryStore, PersistedState};
use chordbank::music::{NoteRange, PitchSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn full_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for bank in 0..12u8 {
        for slot in 0..12 {
            let root = 48 + bank as i32 + slot as i32;
            store
                .save(bank, slot, &[root, root + 4, root + 7, root + 10], "x")
                .unwrap();
        }
    }
    store
}

/// Benchmark recognition for chords of increasing size
fn bench_recognition(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognize");

    let chords: [(&str, Vec<i32>); 4] = [
        ("triad", vec![60, 64, 67]),
        ("seventh", vec![55, 59, 62, 65]),
        ("thirteenth", vec![60, 64, 67, 70, 74, 81]),
        ("cluster", vec![60, 61, 62, 63, 64, 65, 66]),
    ];

    for (label, notes) in chords.iter() {
        let set = PitchSet::from_notes(notes.iter().copied());
        group.bench_with_input(BenchmarkId::new("name", label), &set, |b, set| {
            b.iter(|| black_box(recognize(black_box(set))))
        });
    }

    let all_classes: Vec<u8> = (0..12).collect();
    group.bench_function("best_match_all_classes", |b| {
        b.iter(|| black_box(best_match(black_box(&all_classes))))
    });

    group.finish();
}

/// Benchmark alternate generation
fn bench_alternates(c: &mut Criterion) {
    let range = NoteRange::piano();
    c.bench_function("alternates_dominant_seventh", |b| {
        b.iter(|| {
            black_box(generate_alternates(
                black_box(&[55, 59, 62, 65]),
                Some(7),
                range,
            ))
        })
    });
}

/// Benchmark memory rotation and persistence
fn bench_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory");
    let store = full_store();
    let range = NoteRange::piano();

    group.bench_function("rotate_full", |b| {
        b.iter(|| black_box(store.rotated(black_box(1), range)))
    });

    let json = PersistedState::capture(&store, 0).to_json().unwrap();
    group.bench_function("export_full", |b| {
        b.iter(|| black_box(PersistedState::capture(&store, 0).to_json().unwrap()))
    });
    group.bench_function("import_full", |b| {
        b.iter(|| black_box(import_json(black_box(&json)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_recognition, bench_alternates, bench_memory);

criterion_main!(benches);
