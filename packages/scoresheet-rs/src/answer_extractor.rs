//! Answer extraction over OCR fragments.
//!
//! Students write answers in parentheses, e.g. `(A)` or `(3/4)`. Extraction
//! drops fragments covered by mask rectangles, rebuilds the text, pulls out the
//! bracketed tokens and removes tokens listed as mask words.

use regex::Regex;
use scoresheet_ocr::{PaperQuestion, TextFragment};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

use crate::geometry::{is_fragment_in_region, rectangles_overlap, subtract_masks, Rect};
use crate::text_assembler::{build_text, normalize_text};

/// Longest bracketed token accepted, in characters.
pub const MAX_TOKEN_CHARS: usize = 64;

static BRACKET_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn bracket_pattern() -> Option<&'static Regex> {
    BRACKET_PATTERN
        .get_or_init(|| Regex::new(r"\(([^()]+)\)").ok())
        .as_ref()
}

/// Caller-drawn geometry for one answer sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetLayout {
    pub regions: Vec<Rect>,
    pub mask_areas: Vec<Rect>,
    pub mask_words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub words: Vec<TextFragment>,
    pub full_text: String,
    pub extracted: Vec<String>,
}

/// Extraction result for a single caller region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionExtraction {
    pub region: Rect,
    pub cells: Vec<Rect>,
    pub words: Vec<TextFragment>,
    pub text: String,
    pub extracted: Vec<String>,
}

/// True when the box intersects any mask. Missing geometry is never masked.
pub fn is_masked(fragment: &TextFragment, mask_areas: &[Rect]) -> bool {
    match &fragment.position {
        Some(bbox) => {
            let rect = Rect::from(*bbox);
            mask_areas.iter().any(|m| rectangles_overlap(&rect, m))
        }
        None => false,
    }
}

pub fn filter_by_masks<'a, I>(fragments: I, mask_areas: &[Rect]) -> Vec<TextFragment>
where
    I: IntoIterator<Item = &'a TextFragment>,
{
    fragments
        .into_iter()
        .filter(|f| !is_masked(f, mask_areas))
        .cloned()
        .collect()
}

/// Bracketed tokens of the normalized text, at most `MAX_TOKEN_CHARS` long each.
pub fn extract_bracket_answers(text: &str) -> Vec<String> {
    extract_bracket_answers_limited(text, MAX_TOKEN_CHARS)
}

fn extract_bracket_answers_limited(text: &str, max_chars: usize) -> Vec<String> {
    let Some(re) = bracket_pattern() else {
        return Vec::new();
    };
    let normalized = normalize_text(text);
    re.captures_iter(&normalized)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() <= max_chars)
        .map(str::to_string)
        .collect()
}

/// Drops every token equal to a non-empty mask word, both sides normalized.
pub fn drop_mask_words(tokens: Vec<String>, mask_words: &[String]) -> Vec<String> {
    let masks: Vec<String> = mask_words
        .iter()
        .map(|w| normalize_text(w))
        .filter(|w| !w.is_empty())
        .collect();
    if masks.is_empty() {
        return tokens;
    }
    tokens
        .into_iter()
        .filter(|token| {
            let token = normalize_text(token);
            !masks.iter().any(|m| *m == token)
        })
        .collect()
}

/// Paper segmentation boxes that do not intersect any mask. Questions
/// without a box are kept.
pub fn filter_questions_by_masks(questions: &[PaperQuestion], mask_areas: &[Rect]) -> Vec<PaperQuestion> {
    questions
        .iter()
        .filter(|q| match &q.bbox {
            Some(bbox) => {
                let rect = Rect::from(*bbox);
                !mask_areas.iter().any(|m| rectangles_overlap(&rect, m))
            }
            None => true,
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
pub struct AnswerExtractor {
    max_token_chars: usize,
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new(MAX_TOKEN_CHARS)
    }
}

impl AnswerExtractor {
    pub fn new(max_token_chars: usize) -> Self {
        Self { max_token_chars }
    }

    pub fn max_token_chars(&self) -> usize {
        self.max_token_chars
    }

    /// Mask filtering, text rebuild, bracket extraction and mask-word removal.
    /// `fallback_text` is read only when no fragment carries geometry.
    pub fn extract_answers(
        &self,
        fragments: &[TextFragment],
        mask_areas: &[Rect],
        mask_words: &[String],
        fallback_text: &str,
    ) -> Vec<String> {
        let kept = filter_by_masks(fragments, mask_areas);
        let text = text_or_fallback(build_text(&kept), usable_fallback(fragments, fallback_text));
        let tokens = extract_bracket_answers_limited(&text, self.max_token_chars);
        drop_mask_words(tokens, mask_words)
    }

    /// Whole-sheet extraction when the layout has no regions, otherwise the
    /// union of every region after mask subtraction. Each fragment appears at
    /// most once, in input order.
    pub fn extract(&self, fragments: &[TextFragment], layout: &SheetLayout, fallback_text: &str) -> Extraction {
        let words = if layout.regions.is_empty() {
            filter_by_masks(fragments, &layout.mask_areas)
        } else {
            let cells = subtract_masks(&layout.regions, &layout.mask_areas);
            let hits = fragments
                .iter()
                .filter(|f| cells.iter().any(|cell| is_fragment_in_region(f, cell)));
            filter_by_masks(hits, &layout.mask_areas)
        };

        let full_text = text_or_fallback(build_text(&words), usable_fallback(fragments, fallback_text));
        let extracted = self.extract_answers(&words, &layout.mask_areas, &layout.mask_words, &full_text);

        debug!(
            words = words.len(),
            regions = layout.regions.len(),
            tokens = extracted.len(),
            "extraction finished"
        );

        Extraction {
            words,
            full_text,
            extracted,
        }
    }

    /// One result per caller region, in the order the regions were given.
    pub fn extract_regions(&self, fragments: &[TextFragment], layout: &SheetLayout) -> Vec<RegionExtraction> {
        layout
            .regions
            .iter()
            .map(|region| {
                let cells = subtract_masks(std::slice::from_ref(region), &layout.mask_areas);
                let hits = fragments
                    .iter()
                    .filter(|f| cells.iter().any(|cell| is_fragment_in_region(f, cell)));
                let words = filter_by_masks(hits, &layout.mask_areas);
                let text = build_text(&words);
                let extracted = self.extract_answers(&words, &layout.mask_areas, &layout.mask_words, "");
                debug!(?region, cells = cells.len(), words = words.len(), "region extracted");
                RegionExtraction {
                    region: *region,
                    cells,
                    words,
                    text,
                    extracted,
                }
            })
            .collect()
    }

    /// Answers from paper segmentation output: the explicit `answer` fields if
    /// any are filled, else the first bracketed token of each stem.
    pub fn extract_question_answers(&self, questions: &[PaperQuestion], mask_words: &[String]) -> Vec<String> {
        let answers: Vec<String> = questions
            .iter()
            .map(|q| q.answer.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();

        let base = if answers.is_empty() {
            questions
                .iter()
                .filter_map(|q| self.first_bracket_token(&q.stem))
                .collect()
        } else {
            answers
        };

        drop_mask_words(base, mask_words)
    }

    fn first_bracket_token(&self, stem: &str) -> Option<String> {
        let re = bracket_pattern()?;
        re.captures_iter(stem)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|token| token.chars().count() <= self.max_token_chars)
            .map(str::to_string)
    }
}

/// Vendor text spans the whole sheet and cannot be checked against regions
/// or masks, so it only stands in when no fragment has a position.
fn usable_fallback<'a>(fragments: &[TextFragment], fallback_text: &'a str) -> &'a str {
    if fragments.iter().any(|f| f.position.is_some()) {
        ""
    } else {
        fallback_text
    }
}

fn text_or_fallback(text: String, fallback_text: &str) -> String {
    if text.is_empty() {
        fallback_text.to_string()
    } else {
        text
    }
}
