mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, LayoutArgs};
use chrono::Utc;
use scoresheet_ocr::{
  parse_response, ApiCredentials, CachedToken, OcrInput, RecognitionMode, ReplayOcrEngine, TokenGrant,
};
use scoresheet_rs::{
  extract_questions, grade, grade_detailed, subtract_masks, AnswerSheetAnalyzer, BatchOptions, BatchRunner, Question,
  Rect, ScoresheetConfig, SheetLayout,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "info" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let contents = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&contents).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Keeps the first four characters of a secret.
fn mask_secret(secret: &str) -> String {
  let shown: String = secret.chars().take(4).collect();
  format!("{}***", shown)
}

fn build_layout(args: LayoutArgs, config: &ScoresheetConfig) -> Result<SheetLayout> {
  let regions: Vec<Rect> = match &args.regions {
    Some(path) => read_json(path)?,
    None => Vec::new(),
  };
  let mask_areas: Vec<Rect> = match &args.masks {
    Some(path) => read_json(path)?,
    None => Vec::new(),
  };
  let mut mask_words = config.extraction.mask_words.clone();
  mask_words.extend(args.mask_words);

  Ok(SheetLayout {
    regions,
    mask_areas,
    mask_words,
  })
}

async fn run(args: Args) -> Result<()> {
  let config = match &args.config {
    Some(path) => ScoresheetConfig::load(path)?,
    None => ScoresheetConfig::default(),
  };

  match args.command {
    Commands::Version => {
      println!("scoresheet {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Extract {
      response,
      layout,
      per_region,
    } => {
      let layout = build_layout(layout, &config)?;
      let analyzer = AnswerSheetAnalyzer::new(ReplayOcrEngine::new(), config.extractor());
      let input = OcrInput::FilePath(response.clone());
      if per_region {
        let results = analyzer
          .analyze_regions(&input, &layout)
          .await
          .with_context(|| format!("OCR extraction failed for {}", response.display()))?;
        print_json(&results)?;
      } else {
        let extraction = analyzer
          .analyze(&input, &layout)
          .await
          .with_context(|| format!("OCR extraction failed for {}", response.display()))?;
        print_json(&extraction)?;
      }
    }
    Commands::Questions { response, layout } => {
      let layout = build_layout(layout, &config)?;
      let data = std::fs::read(&response).with_context(|| format!("Failed to read {}", response.display()))?;
      let questions = parse_response(&data)?.into_questions()?;
      print_json(&extract_questions(&config.extractor(), &questions, &layout))?;
    }
    Commands::Subtract { regions, masks } => {
      let regions: Vec<Rect> = read_json(&regions)?;
      let masks: Vec<Rect> = read_json(&masks)?;
      print_json(&subtract_masks(&regions, &masks))?;
    }
    Commands::Grade {
      key,
      answers,
      detailed,
    } => {
      let key: Vec<Question> = read_json(&key)?;
      let answers: Vec<Option<String>> = read_json(&answers)?;
      let answers: Vec<String> = answers.into_iter().map(Option::unwrap_or_default).collect();
      if detailed {
        print_json(&grade_detailed(&key, &answers))?;
      } else {
        print_json(&grade(&key, &answers))?;
      }
    }
    Commands::Batch { dir, layout, jobs } => {
      let options = BatchOptions {
        dir,
        layout: build_layout(layout, &config)?,
        max_concurrent_files: jobs.unwrap_or(config.batch.max_concurrent_files),
      };
      let runner = BatchRunner::new(
        options,
        AnswerSheetAnalyzer::new(ReplayOcrEngine::new(), config.extractor()),
      );
      print_json(&runner.run().await?)?;
    }
    Commands::Credentials { grant } => {
      let credentials = ApiCredentials::from_env()?;
      let mut token = CachedToken::new();
      let now = Utc::now();
      if let Some(path) = grant {
        let grant: TokenGrant = read_json(&path)?;
        token.store(grant, now);
      }
      let request: Vec<&str> = credentials
        .token_request_params()
        .iter()
        .map(|(name, _)| *name)
        .collect();
      print_json(&serde_json::json!({
        "configured": true,
        "apiKey": mask_secret(&credentials.api_key),
        "tokenRequest": request,
        "tokenValid": token.token_at(now).is_some(),
        "tokenExpiresAt": token.expires_at().map(|at| at.to_rfc3339()),
      }))?;
    }
    Commands::Options { mode } => {
      let mut ocr = config.ocr.clone();
      if let Some(mode) = mode {
        ocr.mode = mode.parse::<RecognitionMode>()?;
      }
      let params: serde_json::Map<String, serde_json::Value> = ocr
        .form_params()
        .into_iter()
        .map(|(name, value)| (name.to_string(), serde_json::Value::String(value)))
        .collect();
      print_json(&serde_json::json!({
        "mode": ocr.mode,
        "endpoint": ocr.endpoint(),
        "params": params,
      }))?;
    }
  }

  Ok(())
}

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_tracing(args.verbose);

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}
