//! Command line arguments backing the `scoresheet` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "scoresheet",
  about = "Extract bracketed answers from OCR'd exam papers and grade them",
  version
)]
pub struct Args {
  /// TOML configuration file
  #[arg(long, short = 'c', global = true)]
  pub config: Option<PathBuf>,

  /// Log progress to stderr
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

/// Answer-sheet geometry shared by the extraction commands
#[derive(ClapArgs, Debug, Default)]
pub struct LayoutArgs {
  /// JSON file with answer regions: [{"x":..,"y":..,"width":..,"height":..}]
  #[arg(long, short = 'r')]
  pub regions: Option<PathBuf>,

  /// JSON file with mask rectangles, same shape as regions
  #[arg(long, short = 'm')]
  pub masks: Option<PathBuf>,

  /// Answer to drop from the results (repeatable)
  #[arg(long = "mask-word", short = 'w')]
  pub mask_words: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Extract answers from a recorded OCR vendor response
  Extract {
    /// Vendor response JSON file
    #[arg(long, short = 'f')]
    response: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Report answers separately for each region
    #[arg(long)]
    per_region: bool,
  },
  /// Extract answers from a paper segmentation response
  Questions {
    /// Segmentation response JSON file
    #[arg(long, short = 'f')]
    response: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
  },
  /// Print the cells left after removing masks from regions
  Subtract {
    #[arg(long, short = 'r')]
    regions: PathBuf,

    #[arg(long, short = 'm')]
    masks: PathBuf,
  },
  /// Grade student answers against an answer key
  Grade {
    /// Answer key JSON file: [{"answer":..,"score":..,"type":"choice|judge|fill"}]
    #[arg(long, short = 'k')]
    key: PathBuf,

    /// Student answers JSON file: ["A", "√", ...]
    #[arg(long, short = 'a')]
    answers: PathBuf,

    /// Include per-question outcomes
    #[arg(long)]
    detailed: bool,
  },
  /// Extract answers from every recorded response under a directory
  Batch {
    /// Directory to scan for *.json responses
    #[arg(long, short = 'd', default_value = ".")]
    dir: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Override batch.max_concurrent_files
    #[arg(long, short = 'j')]
    jobs: Option<usize>,
  },
  /// Check vendor credentials in the environment
  Credentials {
    /// Recorded token endpoint response: {"access_token":..,"expires_in":..}
    #[arg(long, short = 'g')]
    grant: Option<PathBuf>,
  },
  /// Print the vendor endpoint and form parameters for a recognition mode
  Options {
    /// doc, paper, handwriting, accurate or general (defaults to ocr.mode)
    #[arg(long)]
    mode: Option<String>,
  },
}
