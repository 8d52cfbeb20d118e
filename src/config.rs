use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcard::OutputOrder;
use crate::selection::SelectionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("numFlashcardsPerWord must be at least 1, got {0}")]
    InvalidFlashcardCount(usize),
    #[error("maxCombinations must be at least 1")]
    InvalidCombinationCap,
}

/// Where the in-use flags of the previous run come from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviousOutput {
    /// The file about to be overwritten.
    #[default]
    SameAsOutput,
    /// Start fresh.
    Ignore,
    File(PathBuf),
}

// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default = "default_input_file_path")]
    pub input_file_path: PathBuf,
    #[serde(default = "default_output_file_path")]
    pub output_file_path: PathBuf,
    #[serde(default)]
    pub previous_output: PreviousOutput,
    #[serde(flatten)]
    pub selection: SelectionConfig,
    #[serde(default = "default_output_order")]
    pub output_order: Vec<OutputOrder>,
    /// Words that get no new flashcards.
    #[serde(default)]
    pub words_to_bury: Vec<String>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_input_file_path() -> PathBuf {
    PathBuf::from("sentences.txt")
}

fn default_output_file_path() -> PathBuf {
    PathBuf::from("clozeFlashcards.json")
}

fn default_output_order() -> Vec<OutputOrder> {
    vec![OutputOrder::Alphabetical]
}

fn default_parallel() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_file_path: default_input_file_path(),
            output_file_path: default_output_file_path(),
            previous_output: PreviousOutput::default(),
            selection: SelectionConfig::default(),
            output_order: default_output_order(),
            words_to_bury: Vec::new(),
            parallel: default_parallel(),
        }
    }
}

impl GeneratorConfig {
    /// Load and validate a JSON config file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.per_word == 0 {
            return Err(ConfigError::InvalidFlashcardCount(self.selection.per_word));
        }
        if self.selection.max_combinations == 0 {
            return Err(ConfigError::InvalidCombinationCap);
        }
        Ok(())
    }

    /// The deck to read in-use flags from, if any.
    pub fn previous_output_path(&self) -> Option<&Path> {
        match &self.previous_output {
            PreviousOutput::SameAsOutput => Some(&self.output_file_path),
            PreviousOutput::Ignore => None,
            PreviousOutput::File(path) => Some(path),
        }
    }
}
