use crate::analyzer::AnswerSheetAnalyzer;
use crate::answer_extractor::{Extraction, SheetLayout};
use anyhow::Result;
use chrono::Utc;
use scoresheet_ocr::{OcrEngine, OcrInput};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options for a batch run over a directory of recorded sheets
pub struct BatchOptions {
    pub dir: PathBuf,
    pub layout: SheetLayout,
    /// Maximum number of files to process concurrently
    pub max_concurrent_files: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            layout: SheetLayout::default(),
            max_concurrent_files: 4,
        }
    }
}

/// Outcome for one sheet; a failed sheet carries its error instead of answers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction: Option<Extraction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub generated_at: String,
    pub total_files: usize,
    pub success_count: usize,
    pub results: Vec<BatchItem>,
}

/// Extracts answers from every `*.json` sheet under a directory
pub struct BatchRunner<E> {
    options: BatchOptions,
    analyzer: Arc<AnswerSheetAnalyzer<E>>,
}

impl<E: OcrEngine + 'static> BatchRunner<E> {
    pub fn new(options: BatchOptions, analyzer: AnswerSheetAnalyzer<E>) -> Self {
        Self {
            options,
            analyzer: Arc::new(analyzer),
        }
    }

    /// Sheet files under the batch directory, sorted by path
    pub fn collect_files(&self) -> Vec<PathBuf> {
        collect_json_files(&self.options.dir)
    }

    pub async fn run(&self) -> Result<BatchReport> {
        let files = self.collect_files();
        if files.is_empty() {
            warn!(dir = %self.options.dir.display(), "no sheet files found");
        }

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrent_files.max(1)));
        let layout = Arc::new(self.options.layout.clone());
        let total_files = files.len();

        let mut tasks = Vec::new();
        for (file_idx, path) in files.into_iter().enumerate() {
            let semaphore = semaphore.clone();
            let analyzer = self.analyzer.clone();
            let layout = layout.clone();
            let file = relative_name(&self.options.dir, &path);

            let task = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return failed(file, e.to_string()),
                };

                debug!("Processing file {}/{}: {}", file_idx + 1, total_files, file);

                match analyzer.analyze(&OcrInput::FilePath(path), &layout).await {
                    Ok(extraction) => BatchItem {
                        file,
                        success: true,
                        extraction: Some(extraction),
                        error: None,
                    },
                    Err(e) => {
                        warn!("Error processing file {}: {}", file, e);
                        failed(file, e.to_string())
                    }
                }
            });

            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(item) => results.push(item),
                Err(e) => warn!("Task join error: {}", e),
            }
        }

        let success_count = results.iter().filter(|r| r.success).count();
        info!(total_files, success_count, "batch_process_done");

        Ok(BatchReport {
            generated_at: Utc::now().to_rfc3339(),
            total_files,
            success_count,
            results,
        })
    }
}

fn failed(file: String, error: String) -> BatchItem {
    BatchItem {
        file,
        success: false,
        extraction: None,
        error: Some(error),
    }
}

fn collect_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

fn relative_name(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
