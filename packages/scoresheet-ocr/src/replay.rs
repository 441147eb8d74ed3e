use async_trait::async_trait;
use tokio::fs;

use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
use crate::vendor::parse_response;

/// Engine that treats its input as an already recorded vendor response.
///
/// Used to re-run extraction over saved payloads without calling the vendor.
pub struct ReplayOcrEngine;

impl ReplayOcrEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReplayOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for ReplayOcrEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let data = match input {
            OcrInput::FilePath(path) => fs::read(path)
                .await
                .map_err(|e| OcrError::InvalidInput(format!("{}: {}", path.display(), e)))?,
            OcrInput::Bytes(data) => data.clone(),
        };
        parse_response(&data)?.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_replay_bytes() {
        let engine = ReplayOcrEngine::new();
        let input = OcrInput::Bytes(br#"{"words_result": [{"words": "(A)"}]}"#.to_vec());
        let output = engine.recognize(&input).await.unwrap();
        assert_eq!(output.text, "(A)");
    }

    #[tokio::test]
    async fn test_replay_missing_file() {
        let engine = ReplayOcrEngine::new();
        let input = OcrInput::FilePath(PathBuf::from("/nonexistent/response.json"));
        let err = engine.recognize(&input).await.unwrap_err();
        assert!(matches!(err, OcrError::InvalidInput(_)));
    }
}
