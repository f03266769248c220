use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};
use crate::weights::CommandWeights;

pub const DEFAULT_CONFIG_FILE: &str = "rbbench.toml";

/// Settings shared by the generator and the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Number of generation iterations; idle iterations emit no line.
    pub line_count: usize,
    pub word_count: usize,
    /// Maximum length of a vocabulary word.
    pub word_length: usize,
    /// Inclusive upper bound of inserted values.
    pub value_max: u64,
    pub command_file: PathBuf,
    pub results_file: PathBuf,
    pub snapshot_file: PathBuf,
    pub engine: PathBuf,
    pub seed: Option<u64>,
    pub persistence_commands_enabled: bool,
    pub timeout_secs: Option<u64>,
    pub inspect_results: bool,
    pub weights: CommandWeights,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            line_count: 200_000,
            word_count: 50,
            word_length: 7,
            value_max: u64::MAX,
            command_file: PathBuf::from("test.txt"),
            results_file: PathBuf::from("res.log"),
            snapshot_file: PathBuf::from("rbtree"),
            engine: PathBuf::from("../build/main"),
            seed: None,
            persistence_commands_enabled: false,
            timeout_secs: None,
            inspect_results: true,
            weights: CommandWeights::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(raw: &str) -> HarnessResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| HarnessError::config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> HarnessResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| HarnessError::config(format!("failed to read '{}': {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// Loads `path` when given, otherwise `rbbench.toml` from the working
    /// directory if it exists, otherwise the defaults.
    pub fn discover(path: Option<&Path>) -> HarnessResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.word_count == 0 {
            return Err(HarnessError::config("word_count must be at least 1"));
        }
        if self.word_length == 0 {
            return Err(HarnessError::config("word_length must be at least 1"));
        }
        if self.timeout_secs == Some(0) {
            return Err(HarnessError::config("timeout_secs must be positive when set"));
        }
        if self
            .weights
            .active_entries(self.persistence_commands_enabled)
            .is_empty()
        {
            return Err(HarnessError::config("command weight table has no positive weight"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
