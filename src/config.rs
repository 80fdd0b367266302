// Tue Jan 13 2026 - Alex

use crate::pattern::{FamilySet, DEFAULT_SPEED_MENU};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub speed_menu: Vec<u64>,
    pub families: FamilySet,
    pub parallel_scan: bool,
    pub header_window: usize,
    pub magic_scan_offsets: usize,
    pub min_string_length: usize,
    pub diff_proximity: usize,
    pub max_reported_differences: usize,
    pub max_reported_regions: usize,
    /// Exclusive lower bound on candidate occurrences for a suggestion.
    pub min_suggestion_occurrences: usize,
    /// Exclusive upper bound on candidate occurrences for a suggestion.
    pub max_suggestion_occurrences: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed_menu: DEFAULT_SPEED_MENU.to_vec(),
            families: FamilySet::all(),
            parallel_scan: false,
            header_window: 64,
            magic_scan_offsets: 28,
            min_string_length: 4,
            diff_proximity: 4,
            max_reported_differences: 100,
            max_reported_regions: 10,
            min_suggestion_occurrences: 1,
            max_suggestion_occurrences: 50,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn with_speed_menu(mut self, menu: Vec<u64>) -> Self {
        self.speed_menu = menu;
        self
    }

    pub fn with_families(mut self, families: FamilySet) -> Self {
        self.families = families;
        self
    }

    pub fn with_parallel_scan(mut self, parallel: bool) -> Self {
        self.parallel_scan = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed_menu.is_empty() {
            return Err(ConfigError::Invalid("speed_menu must not be empty".to_string()));
        }
        if self.families.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one encoding family must be enabled".to_string(),
            ));
        }
        if self.magic_scan_offsets.saturating_add(3) > self.header_window {
            return Err(ConfigError::Invalid(
                "magic_scan_offsets windows must fit inside header_window".to_string(),
            ));
        }
        if self.min_suggestion_occurrences >= self.max_suggestion_occurrences {
            return Err(ConfigError::Invalid(
                "min_suggestion_occurrences must be below max_suggestion_occurrences".to_string(),
            ));
        }
        Ok(())
    }
}
