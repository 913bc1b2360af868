// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! JSON import/export of the chord memory.
//!
//! The persisted shape is
//! `{ "version", "currentBankPitchClass", "bankChords": [12][12] }` where
//! each slot is `null` or `{ "midis": [int], "name": string }`. Imports are
//! validated completely before anything is built, so a rejected payload
//! never touches the caller's store.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::store::{Bank, MemoryStore, StoredChord, BANK_COUNT, SLOT_COUNT};
use crate::music::pitch::{NoteNumber, PitchClass};

/// Format version written on export
pub const FORMAT_VERSION: &str = "1.0";

/// Why an import was rejected
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("bankChords must be an array of exactly 12 banks")]
    BankCount,
    #[error("bank {bank} must be an array of exactly 12 slots")]
    SlotCount { bank: usize },
    #[error("invalid slot data at bank {bank}, slot {slot}: {reason}")]
    InvalidSlot {
        bank: usize,
        slot: usize,
        reason: &'static str,
    },
    #[error("currentBankPitchClass must be an integer from 0 to 11")]
    InvalidCurrentBank,
}

/// One persisted slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedChord {
    pub midis: Vec<NoteNumber>,
    pub name: String,
}

/// The persisted state document, as written on export.
///
/// Imports go through `import_json`, which validates the raw JSON and
/// accepts older field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub current_bank_pitch_class: PitchClass,
    pub bank_chords: Vec<Vec<Option<PersistedChord>>>,
}

impl PersistedState {
    /// Snapshot a store and the current bank
    pub fn capture(store: &MemoryStore, current_bank: PitchClass) -> Self {
        let bank_chords = store
            .banks()
            .iter()
            .map(|bank| {
                bank.iter()
                    .map(|slot| {
                        slot.as_ref().map(|chord| PersistedChord {
                            midis: chord.notes().to_vec(),
                            name: chord.label().to_string(),
                        })
                    })
                    .collect()
            })
            .collect();

        Self {
            version: Some(FORMAT_VERSION.to_string()),
            current_bank_pitch_class: current_bank % 12,
            bank_chords,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize chord banks")
    }
}

/// A validated import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedState {
    pub store: MemoryStore,
    /// `None` when the payload did not name a current bank
    pub current_bank: Option<PitchClass>,
}

fn parse_slot(value: &Value, bank: usize, slot: usize) -> Result<Option<StoredChord>, ImportError> {
    let invalid = |reason| ImportError::InvalidSlot { bank, slot, reason };

    let obj = match value {
        Value::Null => return Ok(None),
        Value::Object(obj) => obj,
        _ => return Err(invalid("expected null or an object")),
    };

    let midis = obj
        .get("midis")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing midis array"))?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing name string"))?;

    let notes = midis
        .iter()
        .map(|m| {
            m.as_i64()
                .and_then(|n| NoteNumber::try_from(n).ok())
                .ok_or_else(|| invalid("midis must be integers"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(StoredChord::new(notes, name)))
}

fn parse_current_bank(obj: &serde_json::Map<String, Value>) -> Result<Option<PitchClass>, ImportError> {
    let value = obj
        .get("currentBankPitchClass")
        .or_else(|| obj.get("currentScalePc"));
    match value {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .filter(|&pc| pc < 12)
            .map(|pc| Some(pc as PitchClass))
            .ok_or(ImportError::InvalidCurrentBank),
    }
}

/// Validate and convert a JSON document; all or nothing
pub fn import_json(json: &str) -> Result<ImportedState, ImportError> {
    let root: Value = serde_json::from_str(json)?;
    let obj = root.as_object().ok_or(ImportError::NotAnObject)?;

    let banks_value = obj
        .get("bankChords")
        .and_then(Value::as_array)
        .filter(|banks| banks.len() == BANK_COUNT)
        .ok_or(ImportError::BankCount)?;

    let mut banks: Vec<Bank> = Vec::with_capacity(BANK_COUNT);
    for (b, bank_value) in banks_value.iter().enumerate() {
        let slots = bank_value
            .as_array()
            .filter(|slots| slots.len() == SLOT_COUNT)
            .ok_or(ImportError::SlotCount { bank: b })?;

        let mut bank: Bank = std::array::from_fn(|_| None);
        for (s, slot_value) in slots.iter().enumerate() {
            bank[s] = parse_slot(slot_value, b, s)?;
        }
        banks.push(bank);
    }

    let current_bank = parse_current_bank(obj)?;
    let banks: [Bank; BANK_COUNT] = banks.try_into().map_err(|_| ImportError::BankCount)?;

    debug!(filled = banks.iter().flatten().filter(|s| s.is_some()).count(), "validated chord bank import");
    Ok(ImportedState {
        store: MemoryStore::from_banks(banks),
        current_bank,
    })
}

/// Read a state file; a missing file yields an empty store on bank C
pub fn load_state_file<P: AsRef<Path>>(path: P) -> Result<(MemoryStore, PitchClass)> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no state file, starting with empty banks");
        return Ok((MemoryStore::new(), 0));
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {:?}", path))?;
    let imported = import_json(&contents)
        .with_context(|| format!("Failed to import state file: {:?}", path))?;
    Ok((imported.store, imported.current_bank.unwrap_or(0)))
}

/// Write a state file
pub fn save_state_file<P: AsRef<Path>>(
    path: P,
    store: &MemoryStore,
    current_bank: PitchClass,
) -> Result<()> {
    let path = path.as_ref();
    let json = PersistedState::capture(store, current_bank).to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write state file: {:?}", path))?;
    debug!(path = %path.display(), "saved state file");
    Ok(())
}
