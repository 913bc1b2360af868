// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for chordbank.
//!
//! Settings are read from YAML or TOML, chosen by file extension. Every
//! field has a default, so an empty file (or no file) is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::pitch::{NoteNumber, NoteRange, PIANO_HIGH, PIANO_LOW};

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => bail!("Unsupported config file extension: {:?}", path),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Shift the chord memory and current bank along with the selection
    #[serde(default = "default_linked_transpose")]
    pub linked_transpose: bool,
    /// Applied alternates that can be undone
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
    /// Where the command line keeps the chord memory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
    /// Playable note range
    #[serde(default)]
    pub range: RangeConfig,
}

fn default_linked_transpose() -> bool {
    true
}
fn default_undo_depth() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            linked_transpose: default_linked_transpose(),
            undo_depth: default_undo_depth(),
            state_file: None,
            range: RangeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load a configuration file, YAML or TOML by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = match format {
            ConfigFormat::Yaml => Self::from_yaml(&contents),
            ConfigFormat::Toml => Self::from_toml(&contents),
        }
        .with_context(|| format!("Invalid config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save to a file, YAML or TOML by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Yaml => self.to_yaml()?,
            ConfigFormat::Toml => self.to_toml()?,
        };
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.note_range()?;
        if self.undo_depth == 0 {
            bail!("undo_depth must be at least 1");
        }
        Ok(())
    }

    /// The configured range as a `NoteRange`
    pub fn note_range(&self) -> Result<NoteRange> {
        NoteRange::new(self.range.min, self.range.max).context("Invalid note range in config")
    }
}

/// Range section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeConfig {
    /// Lowest playable note (default A0)
    #[serde(default = "default_range_min")]
    pub min: NoteNumber,
    /// Highest playable note (default C8)
    #[serde(default = "default_range_max")]
    pub max: NoteNumber,
}

fn default_range_min() -> NoteNumber {
    PIANO_LOW
}
fn default_range_max() -> NoteNumber {
    PIANO_HIGH
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: default_range_min(),
            max: default_range_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.linked_transpose);
        assert_eq!(config.undo_depth, 5);
        assert!(config.state_file.is_none());
        assert_eq!(config.note_range().unwrap(), NoteRange::piano());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
range:
  min: 48
  max: 84
linked_transpose: false
undo_depth: 10
state_file: "banks.json"
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.range, RangeConfig { min: 48, max: 84 });
        assert!(!config.linked_transpose);
        assert_eq!(config.undo_depth, 10);
        assert_eq!(config.state_file, Some(PathBuf::from("banks.json")));
    }

    #[test]
    fn test_parse_toml_partial() {
        let toml_str = r#"
undo_depth = 3

[range]
min = 36
"#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.undo_depth, 3);
        assert_eq!(config.range.min, 36);
        assert_eq!(config.range.max, 108);
        assert!(config.linked_transpose);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = AppConfig::from_yaml("range:\n  min: 80\n  max: 60\n").unwrap();
        assert!(config.note_range().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.range.min = 40;
        config.state_file = Some(PathBuf::from("state.json"));

        for name in ["chordbank.yaml", "chordbank.toml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(AppConfig::load(&path).unwrap(), config, "{}", name);
        }
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.yaml");
        fs::write(&path, "this is not valid yaml: [").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_unknown_extension() {
        assert!(ConfigFormat::from_path(Path::new("settings.ini")).is_err());
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.YML")).unwrap(),
            ConfigFormat::Yaml
        );
    }
}
