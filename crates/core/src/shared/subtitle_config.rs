use std::path::{Path, PathBuf};

use thiserror::Error;

use super::constants::SRT_EXTENSION;
use super::model_size::ModelSize;
use crate::captions::domain::caption_formatter::DEFAULT_MAX_WORDS;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max words must be a positive integer, got {0}")]
    InvalidMaxWords(usize),
    #[error("unknown model '{0}', expected one of: tiny, base, small, medium, large")]
    UnknownModel(String),
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// Settings for one subtitle generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleConfig {
    pub model: ModelSize,
    /// Language hint such as `en`; `None` lets the recognizer detect it.
    pub language: Option<String>,
    pub max_words: usize,
    pub output_path: Option<PathBuf>,
}

impl SubtitleConfig {
    pub fn new(
        model: ModelSize,
        language: Option<String>,
        max_words: usize,
        output_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            model,
            language: language
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            max_words,
            output_path,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_words == 0 {
            return Err(ConfigError::InvalidMaxWords(self.max_words));
        }
        Ok(())
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Where the SRT for `input` goes: the explicit output path if set,
    /// otherwise `<input without extension>.<model>.srt`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => input.with_extension(format!("{}.{SRT_EXTENSION}", self.model)),
        }
    }
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            model: ModelSize::default(),
            language: None,
            max_words: DEFAULT_MAX_WORDS,
            output_path: None,
        }
    }
}
