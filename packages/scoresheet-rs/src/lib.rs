//! # scoresheet-rs
//!
//! Answer extraction and grading for scanned exam papers run through a cloud OCR service.
//!
//! ## Features
//!
//! - **Geometry**: Hit-test OCR fragments against answer regions and carve mask rectangles out of regions
//! - **Text Assembly**: Rebuild text from fragments and fold full-width punctuation and LaTeX fractions away
//! - **Answer Extraction**: Pull bracketed answers such as `(A)` or `(3/4)` out of a sheet, per region or whole
//! - **Grading**: Compare answers per question type (choice, judge, fill) and aggregate scores
//! - **Batch**: Re-run extraction over a directory of recorded OCR responses concurrently
//!
//! ## Quick Start
//!
//! ```ignore
//! use scoresheet_rs::prelude::*;
//!
//! // Extract answers from OCR fragments
//! let layout = SheetLayout {
//!     regions: vec![Rect::new(0.0, 0.0, 400.0, 120.0)],
//!     mask_areas: vec![Rect::new(300.0, 0.0, 100.0, 120.0)],
//!     mask_words: vec!["A".to_string()],
//! };
//! let extraction = AnswerExtractor::default().extract(&fragments, &layout, "");
//!
//! // Grade them
//! let key = vec![Question::new("B", 10.0, QuestionType::Choice)];
//! let result = grade(&key, &extraction.extracted);
//! println!("{}%", result.percentage);
//! ```

pub mod analyzer;
pub mod answer_extractor;
pub mod batch;
pub mod config;
pub mod geometry;
pub mod grader;
pub mod text_assembler;

// Re-export commonly used types at the root level
pub use analyzer::{extract_questions, AnswerSheetAnalyzer, QuestionExtraction};
pub use answer_extractor::{
    drop_mask_words, extract_bracket_answers, filter_by_masks, filter_questions_by_masks, is_masked, AnswerExtractor,
    Extraction, RegionExtraction, SheetLayout,
};
pub use batch::{BatchItem, BatchOptions, BatchReport, BatchRunner};
pub use config::{ConfigError, ScoresheetConfig};
pub use geometry::{center_inside, fragments_in_region, is_fragment_in_region, rectangles_overlap, subtract_masks, Rect};
pub use grader::{grade, grade_detailed, normalize_answer, GradeReport, GradeResult, Question, QuestionOutcome, QuestionType};
pub use text_assembler::{build_text, normalize_latex_fraction, normalize_text};

pub use scoresheet_ocr::{BoundingBox, PaperQuestion, TextFragment};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use scoresheet_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        build_text, center_inside, drop_mask_words, extract_bracket_answers, extract_questions, filter_by_masks,
        filter_questions_by_masks, fragments_in_region, grade, grade_detailed, is_fragment_in_region, is_masked,
        normalize_answer, normalize_latex_fraction, normalize_text, rectangles_overlap, subtract_masks,
        AnswerExtractor, AnswerSheetAnalyzer, BatchItem, BatchOptions, BatchReport, BatchRunner, BoundingBox,
        Extraction, GradeReport, GradeResult, PaperQuestion, Question, QuestionExtraction, QuestionOutcome,
        QuestionType, Rect, RegionExtraction, ScoresheetConfig, SheetLayout, TextFragment,
    };
}
