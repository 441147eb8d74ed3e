//! Scoresheet configuration
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [extraction]
//! max_token_chars = 64
//! mask_words = ["答案"]
//!
//! [batch]
//! max_concurrent_files = 8
//!
//! [ocr]
//! mode = "handwriting"
//!
//! [ocr.handwriting]
//! recognize_granularity = "small"
//! ```

use anyhow::{Context, Result};
use scoresheet_ocr::OcrOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::answer_extractor::{AnswerExtractor, MAX_TOKEN_CHARS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("extraction.max_token_chars must be at least 1")]
    ZeroTokenLimit,
    #[error("batch.max_concurrent_files must be at least 1")]
    ZeroConcurrency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoresheetConfig {
    pub extraction: ExtractionConfig,
    pub batch: BatchConfig,
    pub ocr: OcrOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Longest bracketed answer kept, in characters
    pub max_token_chars: usize,
    /// Mask words applied to every extraction in addition to per-call ones
    pub mask_words: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_token_chars: MAX_TOKEN_CHARS,
            mask_words: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_concurrent_files: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: 4,
        }
    }
}

impl ScoresheetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ScoresheetConfig = toml::from_str(contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.max_token_chars == 0 {
            return Err(ConfigError::ZeroTokenLimit);
        }
        if self.batch.max_concurrent_files == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn extractor(&self) -> AnswerExtractor {
        AnswerExtractor::new(self.extraction.max_token_chars)
    }
}
