// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chordbank::config::AppConfig;
use chordbank::memory::{load_state_file, save_state_file, SLOT_COUNT};
use chordbank::music::{note_label, note_name, parse_note_number, Note, NoteNumber, PitchClass};
use chordbank::session::Session;
use tracing::{debug, Level};

const DEFAULT_STATE_FILE: &str = "chordbank.json";

fn print_usage() {
    println!("chordbank - Chord recognition and transposable chord memory");
    println!();
    println!("Usage: chordbank [--config FILE] [--verbose] <COMMAND>");
    println!();
    println!("Notes are MIDI numbers (60) or names with octave (C4, F#3).");
    println!("Slots are numbered 1-12 within the current bank.");
    println!();
    println!("Commands:");
    println!("  --detect <NOTES..>            Name the chord formed by the notes");
    println!("  --alternates <NOTES..>        Suggest alternate chords");
    println!("  --transpose <D> <NOTES..>     Shift notes by D semitones (rotates banks when linked)");
    println!("  --banks                       Show the current bank and stored chords");
    println!("  --bank <NOTE|PC>              Select the current bank (C..B or 0-11)");
    println!("  --save <SLOT> <LABEL> <NOTES..>  Store notes in a slot (LABEL '-' = auto)");
    println!("  --load <SLOT>                 Show a stored chord");
    println!("  --clear <SLOT>                Empty a slot");
    println!("  --import <FILE>               Replace all banks from a JSON export");
    println!("  --export <FILE>               Write all banks as JSON");
    println!("  --help                        Show this help message");
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_notes(args: &[String]) -> Result<Vec<NoteNumber>> {
    if args.is_empty() {
        bail!("No notes given");
    }
    args.iter()
        .map(|arg| parse_note_number(arg).with_context(|| format!("Invalid note: {}", arg)))
        .collect()
}

fn parse_slot(arg: Option<&String>) -> Result<usize> {
    let Some(arg) = arg else {
        bail!("A slot number (1-{}) is required", SLOT_COUNT);
    };
    match arg.parse::<usize>() {
        Ok(n) if (1..=SLOT_COUNT).contains(&n) => Ok(n - 1),
        _ => bail!("Invalid slot number: {} (expected 1-{})", arg, SLOT_COUNT),
    }
}

fn parse_bank(arg: &str) -> Result<PitchClass> {
    if let Ok(pc) = arg.parse::<u8>() {
        if pc < 12 {
            return Ok(pc);
        }
        bail!("Invalid bank: {} (expected 0-11)", arg);
    }
    let note: Note = arg.parse()?;
    Ok(note.pitch_class())
}

fn format_notes(notes: &[NoteNumber]) -> String {
    notes
        .iter()
        .map(|&n| format!("{} ({})", note_label(n), n))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Command-line context: settings plus the state file location
struct Cli {
    config: AppConfig,
    state_file: PathBuf,
}

impl Cli {
    fn new(config: AppConfig) -> Self {
        let state_file = config
            .state_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
        Self { config, state_file }
    }

    fn blank_session(&self) -> Result<Session> {
        Session::from_config(&self.config)
    }

    fn stored_session(&self) -> Result<Session> {
        let (store, bank) = load_state_file(&self.state_file)?;
        Ok(self.blank_session()?.with_memory(store, bank))
    }

    fn persist(&self, session: &Session) -> Result<()> {
        save_state_file(&self.state_file, session.store(), session.current_bank())
    }

    fn detect(&self, notes: Vec<NoteNumber>) -> Result<()> {
        let mut session = self.blank_session()?;
        session.set_selection(notes);
        match session.recognize() {
            Some(chord) => {
                println!("Chord:  {}", chord.name);
                println!("Degree: {}", session.chord_name());
                println!("Root:   {}", note_name(chord.root_pc));
                println!("Notes:  {}", format_notes(&session.notes()));
            }
            None => println!("No chord"),
        }
        Ok(())
    }

    fn alternates(&self, notes: Vec<NoteNumber>) -> Result<()> {
        let mut session = self.blank_session()?;
        session.set_selection(notes);
        let alternates = session.alternates();
        if alternates.is_empty() {
            println!("No alternate suggestions for this selection");
            return Ok(());
        }
        for alt in alternates {
            println!("{:<10} {:<32} {}", alt.name, alt.description, format_notes(&alt.notes));
        }
        Ok(())
    }

    fn transpose(&self, delta: i32, notes: Vec<NoteNumber>) -> Result<()> {
        let mut session = self.stored_session()?;
        session.set_selection(notes);
        session.transpose(delta);

        println!("Notes: {}", format_notes(&session.notes()));
        if !session.chord_name().is_empty() {
            println!("Chord: {}", session.chord_name());
        }
        if session.is_linked() {
            self.persist(&session)?;
            println!("Bank:  {}", note_name(session.current_bank()));
        }
        Ok(())
    }

    fn show_banks(&self) -> Result<()> {
        let session = self.stored_session()?;
        let bank = session.current_bank();
        println!("Current bank: {}", note_name(bank));

        let mut any = false;
        for (slot, chord) in session.store().iter() {
            any = true;
            let marker = if slot.bank == bank { "*" } else { " " };
            println!(
                "{} {:<2} slot {:>2}  {:<12} {}",
                marker,
                note_name(slot.bank),
                slot.slot + 1,
                chord.label(),
                format_notes(chord.notes())
            );
        }
        if !any {
            println!("No stored chords");
        }
        Ok(())
    }

    fn set_bank(&self, bank: PitchClass) -> Result<()> {
        let mut session = self.stored_session()?;
        session.set_bank(bank);
        self.persist(&session)?;
        println!("Current bank: {}", note_name(session.current_bank()));
        Ok(())
    }

    fn save(&self, slot: usize, label: &str, notes: Vec<NoteNumber>) -> Result<()> {
        let mut session = self.stored_session()?;
        session.set_selection(notes);
        let label = (label != "-").then_some(label);
        let stored = session.save_slot(slot, label)?;
        self.persist(&session)?;
        println!(
            "Saved slot {} for {}: {}",
            slot + 1,
            note_name(session.current_bank()),
            stored
        );
        Ok(())
    }

    fn load(&self, slot: usize) -> Result<()> {
        let mut session = self.stored_session()?;
        if !session.load_slot(slot)? {
            println!("Slot {} is empty", slot + 1);
            return Ok(());
        }
        println!("Chord: {}", session.chord_name());
        println!("Notes: {}", format_notes(&session.notes()));
        Ok(())
    }

    fn clear(&self, slot: usize) -> Result<()> {
        let mut session = self.stored_session()?;
        match session.clear_slot(slot)? {
            Some(chord) => {
                self.persist(&session)?;
                println!("Cleared slot {} ({})", slot + 1, chord.label());
            }
            None => println!("Slot {} is already empty", slot + 1),
        }
        Ok(())
    }

    fn import(&self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {:?}", path))?;
        let mut session = self.stored_session()?;
        session
            .import_json(&json)
            .with_context(|| format!("Failed to import {:?}", path))?;
        self.persist(&session)?;
        println!("Imported {} chords", session.store().filled_count());
        Ok(())
    }

    fn export(&self, path: &Path) -> Result<()> {
        let session = self.stored_session()?;
        let json = session.export_json()?;
        fs::write(path, json).with_context(|| format!("Failed to write export file: {:?}", path))?;
        println!("Exported {} chords to {:?}", session.store().filled_count(), path);
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<PathBuf> = None;
    let mut verbose = false;
    loop {
        match args.first().map(String::as_str) {
            Some("--config") => {
                if args.len() < 2 {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(args.remove(1)));
                args.remove(0);
            }
            Some("--verbose") | Some("-v") => {
                verbose = true;
                args.remove(0);
            }
            _ => break,
        }
    }

    init_logging(verbose);

    if args.is_empty() {
        println!("chordbank - Chord recognition and transposable chord memory");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let config = match &config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    debug!(?config_path, "configuration loaded");
    let cli = Cli::new(config);

    match args[0].as_str() {
        "--detect" => cli.detect(parse_notes(&args[1..])?)?,
        "--alternates" => cli.alternates(parse_notes(&args[1..])?)?,
        "--transpose" => {
            if args.len() < 3 {
                eprintln!("Error: --transpose requires a semitone amount and notes");
                std::process::exit(1);
            }
            let delta: i32 = args[1]
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid semitone amount: {}", args[1]))?;
            cli.transpose(delta, parse_notes(&args[2..])?)?;
        }
        "--banks" => cli.show_banks()?,
        "--bank" => {
            if args.len() < 2 {
                eprintln!("Error: --bank requires a note name or pitch class");
                std::process::exit(1);
            }
            cli.set_bank(parse_bank(&args[1])?)?;
        }
        "--save" => {
            if args.len() < 4 {
                eprintln!("Error: --save requires a slot, a label and notes");
                std::process::exit(1);
            }
            let slot = parse_slot(args.get(1))?;
            cli.save(slot, &args[2], parse_notes(&args[3..])?)?;
        }
        "--load" => cli.load(parse_slot(args.get(1))?)?,
        "--clear" => cli.clear(parse_slot(args.get(1))?)?,
        "--import" | "--export" => {
            if args.len() < 2 {
                eprintln!("Error: {} requires a file path", args[0]);
                std::process::exit(1);
            }
            let path = PathBuf::from(&args[1]);
            if args[0] == "--import" {
                cli.import(&path)?;
            } else {
                cli.export(&path)?;
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[0]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
