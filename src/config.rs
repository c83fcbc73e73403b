//! Configuration: where graphs live and how poems are shaped.
//!
//! Persisted as TOML. Every field has a default, so a partial file (or none
//! at all) is valid; CLI flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::graph::MeterScope;
use crate::meter::DEFAULT_METER;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodyConfig {
    /// Directory holding `<name>.json` graph files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub poem: PoemConfig,
}

/// Shape of a generated poem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemConfig {
    /// Bigrams per line.
    #[serde(default = "default_line_length")]
    pub line_length: usize,
    /// Rhyme class of each line, e.g. `["A", "B", "A", "B"]`.
    #[serde(default = "default_scheme")]
    pub scheme: Vec<String>,
    /// Target stress pattern; `None` or `""` disables the meter filter.
    /// TOML has no null, so a file disables meter with `meter = ""`.
    #[serde(default = "default_meter")]
    pub meter: Option<String>,
    #[serde(default)]
    pub meter_scope: MeterScope,
    /// Fixed seed for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on search steps; `None` searches until starts run out.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_line_length() -> usize {
    4
}

fn default_scheme() -> Vec<String> {
    parse_scheme("ABAB")
}

fn default_meter() -> Option<String> {
    Some(DEFAULT_METER.to_string())
}

impl Default for ProsodyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            poem: PoemConfig::default(),
        }
    }
}

impl Default for PoemConfig {
    fn default() -> Self {
        Self {
            line_length: default_line_length(),
            scheme: default_scheme(),
            meter: default_meter(),
            meter_scope: MeterScope::default(),
            seed: None,
            max_steps: None,
        }
    }
}

/// Parse a rhyme scheme.
///
/// `"ABAB"` gives one label per character; `"A,B,A,B"` or `"a1 b1 a1"` split
/// on commas or whitespace for multi-character labels.
pub fn parse_scheme(scheme: &str) -> Vec<String> {
    if scheme.contains(',') || scheme.trim().contains(char::is_whitespace) {
        scheme
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        scheme.trim().chars().map(String::from).collect()
    }
}

impl ProsodyConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
