use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::region::TextFragment;

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub struct OcrOutput {
    /// Non-empty recognized lines joined with `\n`.
    pub text: String,
    pub fragments: Vec<TextFragment>,
}

impl OcrOutput {
    /// Builds the output the way the vendor adapters do: every fragment is kept,
    /// but only trimmed non-empty lines make it into `text`.
    pub fn from_fragments(fragments: Vec<TextFragment>) -> Result<Self, OcrError> {
        let text = fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() {
            return Err(OcrError::NoText);
        }
        Ok(Self { text, fragments })
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("unsupported operation")]
    Unsupported,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: String },
    #[error("missing environment variable {0}")]
    MissingCredentials(&'static str),
    #[error("vendor error {code}: {message}")]
    Vendor { code: i64, message: String },
    #[error("no text recognized")]
    NoText,
    #[error("engine error: {0}")]
    EngineError(String),
    #[error("malformed vendor response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}
