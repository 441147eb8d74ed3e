//! Adapters from raw Baidu OCR payloads to [`TextFragment`]s.
//!
//! The vendor answers with one of a few schemas depending on the endpoint.
//! Each schema gets its own variant and its own adapter; callers only ever
//! see [`OcrOutput`] or [`PaperQuestion`]s.

use serde::Deserialize;

use crate::engine::{OcrError, OcrOutput};
use crate::region::{BoundingBox, PaperQuestion, TextFragment};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VendorResponse {
    Failure(Failure),
    WordsResult(WordsResultResponse),
    Results(ResultsResponse),
    Questions(QuestionsResponse),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Failure {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

/// `handwriting`, `accurate_basic` and `general_basic` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WordsResultResponse {
    pub words_result: Vec<WordsResultItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordsResultItem {
    #[serde(default)]
    pub words: String,
    #[serde(default)]
    pub location: Option<BoundingBox>,
    #[serde(default)]
    pub probability: Option<Probability>,
}

/// `doc_analysis` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsResponse {
    pub results: Vec<ResultsItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsItem {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub words: Option<ResultWords>,
    #[serde(default)]
    pub location: Option<BoundingBox>,
    #[serde(default)]
    pub disp_line_poly: Option<Polygon>,
    #[serde(default)]
    pub probability: Option<Probability>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultWords {
    Pieces(Vec<String>),
    Line {
        #[serde(default)]
        word: String,
        #[serde(default)]
        words_location: Option<BoundingBox>,
        #[serde(default)]
        line_probability: Option<Probability>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Polygon {
    #[serde(default)]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Probability {
    #[serde(default)]
    pub average: f32,
}

/// `paper_cut_edu` shape, as relayed by the upload service.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<PaperQuestion>,
}

pub fn parse_response(data: &[u8]) -> Result<VendorResponse, OcrError> {
    Ok(serde_json::from_slice(data)?)
}

impl VendorResponse {
    /// Normalizes any text-bearing response into fragments plus joined text.
    pub fn into_output(self) -> Result<OcrOutput, OcrError> {
        let fragments = match self {
            VendorResponse::Failure(failure) => return Err(failure.into()),
            VendorResponse::WordsResult(r) => fragments_from_words_result(r.words_result),
            VendorResponse::Results(r) => fragments_from_results(r.results),
            VendorResponse::Questions(r) => fragments_from_questions(r.questions),
        };
        OcrOutput::from_fragments(fragments)
    }

    pub fn into_questions(self) -> Result<Vec<PaperQuestion>, OcrError> {
        match self {
            VendorResponse::Failure(failure) => Err(failure.into()),
            VendorResponse::Questions(r) => Ok(r.questions),
            _ => Err(OcrError::Unsupported),
        }
    }
}

impl From<Failure> for OcrError {
    fn from(failure: Failure) -> Self {
        OcrError::Vendor {
            code: failure.error_code,
            message: failure.error_msg,
        }
    }
}

pub fn fragments_from_words_result(items: Vec<WordsResultItem>) -> Vec<TextFragment> {
    items
        .into_iter()
        .map(|item| TextFragment {
            text: item.words,
            confidence: item.probability.map(|p| p.average).unwrap_or(0.0),
            position: item.location,
        })
        .collect()
}

pub fn fragments_from_results(items: Vec<ResultsItem>) -> Vec<TextFragment> {
    items.into_iter().map(fragment_from_result).collect()
}

fn fragment_from_result(item: ResultsItem) -> TextFragment {
    let (words_text, words_location, words_probability) = match item.words {
        Some(ResultWords::Pieces(pieces)) => (Some(pieces.concat()), None, None),
        Some(ResultWords::Line {
            word,
            words_location,
            line_probability,
        }) => (Some(word), words_location, line_probability),
        None => (None, None, None),
    };

    let text = [item.text, item.content, words_text]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    let position = item.location.or(words_location).or_else(|| {
        item.disp_line_poly
            .and_then(|poly| BoundingBox::from_points(poly.points.into_iter().map(|p| (p.x, p.y))))
    });

    let confidence = item
        .probability
        .or(words_probability)
        .map(|p| p.average)
        .or(item.confidence)
        .unwrap_or(0.0);

    TextFragment {
        text,
        confidence,
        position,
    }
}

fn fragments_from_questions(questions: Vec<PaperQuestion>) -> Vec<TextFragment> {
    questions
        .into_iter()
        .map(|q| TextFragment {
            text: q.stem,
            confidence: 0.0,
            position: q.bbox,
        })
        .collect()
}
