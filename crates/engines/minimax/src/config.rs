//! Engine configuration, loaded from TOML or set option by option.

use std::path::Path;
use std::time::Duration;

use chess_core::SearchLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::SearchSettings;
use crate::tt::Replacement;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
    #[error("{name} must be at least {min}, got {value}")]
    OutOfRange { name: &'static str, min: u64, value: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub name: String,
    /// Deepest iteration of a search
    pub depth: u8,
    pub quiescence_depth: u8,
    /// Keep the transposition table between moves
    pub persistent_table: bool,
    /// Occurrences at which a repeated position scores as a draw
    pub repetition_count: usize,
    /// Per-move time budget in milliseconds
    pub move_time_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Minimax".to_string(),
            depth: 3,
            quiescence_depth: 10,
            persistent_table: false,
            repetition_count: 2,
            move_time_ms: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < 1 {
            return Err(ConfigError::OutOfRange {
                name: "depth",
                min: 1,
                value: self.depth as u64,
            });
        }
        if self.repetition_count < 2 {
            return Err(ConfigError::OutOfRange {
                name: "repetition_count",
                min: 2,
                value: self.repetition_count as u64,
            });
        }
        Ok(())
    }

    /// Apply a UCI-style option. Names are case-insensitive; on error the
    /// config is left unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match name.to_ascii_lowercase().as_str() {
            "depth" => next.depth = parse(name, value)?,
            "quiescencedepth" => next.quiescence_depth = parse(name, value)?,
            "persistenthash" => next.persistent_table = parse(name, value)?,
            "repetitioncount" => next.repetition_count = parse(name, value)?,
            "movetime" => {
                let ms: u64 = parse(name, value)?;
                next.move_time_ms = (ms > 0).then_some(ms);
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            quiescence_depth: self.quiescence_depth,
            repetition_count: self.repetition_count,
        }
    }

    pub fn limits(&self) -> SearchLimits {
        match self.move_time_ms {
            Some(ms) => SearchLimits::depth_and_time(self.depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(self.depth),
        }
    }

    pub fn replacement(&self) -> Replacement {
        if self.persistent_table {
            Replacement::DepthPreferred
        } else {
            Replacement::Always
        }
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
