//! Runs an OCR engine over an answer sheet and feeds the result through extraction.

use scoresheet_ocr::{OcrEngine, OcrError, OcrInput, OcrOutput, PaperQuestion};
use tracing::{debug, info};

use crate::answer_extractor::{filter_questions_by_masks, AnswerExtractor, Extraction, RegionExtraction, SheetLayout};

/// Questions left after masking plus the answers drawn from them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct QuestionExtraction {
    pub questions: Vec<PaperQuestion>,
    pub extracted: Vec<String>,
}

pub struct AnswerSheetAnalyzer<E> {
    engine: E,
    extractor: AnswerExtractor,
}

impl<E: OcrEngine> AnswerSheetAnalyzer<E> {
    pub fn new(engine: E, extractor: AnswerExtractor) -> Self {
        Self { engine, extractor }
    }

    pub fn extractor(&self) -> &AnswerExtractor {
        &self.extractor
    }

    /// A sheet on which nothing was recognized yields an empty result.
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        match self.engine.recognize(input).await {
            Ok(output) => Ok(output),
            Err(OcrError::NoText) => {
                debug!("engine recognized no text");
                Ok(OcrOutput::default())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn analyze(&self, input: &OcrInput, layout: &SheetLayout) -> Result<Extraction, OcrError> {
        let output = self.recognize(input).await?;
        let extraction = self.extractor.extract(&output.fragments, layout, &output.text);
        info!(answers = extraction.extracted.len(), "ocr_success");
        Ok(extraction)
    }

    pub async fn analyze_regions(
        &self,
        input: &OcrInput,
        layout: &SheetLayout,
    ) -> Result<Vec<RegionExtraction>, OcrError> {
        let output = self.recognize(input).await?;
        let results = self.extractor.extract_regions(&output.fragments, layout);
        info!(areas = results.len(), "area_ocr_success");
        Ok(results)
    }
}

/// Applies a layout's masks to paper segmentation output.
pub fn extract_questions(
    extractor: &AnswerExtractor,
    questions: &[PaperQuestion],
    layout: &SheetLayout,
) -> QuestionExtraction {
    let questions = filter_questions_by_masks(questions, &layout.mask_areas);
    let extracted = extractor.extract_question_answers(&questions, &layout.mask_words);
    info!(questions = questions.len(), "paper_cut_success");
    QuestionExtraction { questions, extracted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use async_trait::async_trait;
    use scoresheet_ocr::{BoundingBox, TextFragment};

    struct FixedEngine(Result<Vec<TextFragment>, fn() -> OcrError>);

    #[async_trait]
    impl OcrEngine for FixedEngine {
        async fn recognize(&self, _input: &OcrInput) -> Result<OcrOutput, OcrError> {
            match &self.0 {
                Ok(fragments) => OcrOutput::from_fragments(fragments.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn input() -> OcrInput {
        OcrInput::Bytes(Vec::new())
    }

    #[tokio::test]
    async fn test_analyze_with_masks() {
        let engine = FixedEngine(Ok(vec![
            TextFragment::new("1.(A)", 0.9, Some(BoundingBox::new(0.0, 0.0, 50.0, 10.0))),
            TextFragment::new("key:(A)(B)", 0.9, Some(BoundingBox::new(0.0, 200.0, 50.0, 10.0))),
            TextFragment::new("2.(B)", 0.9, Some(BoundingBox::new(0.0, 20.0, 50.0, 10.0))),
        ]));
        let analyzer = AnswerSheetAnalyzer::new(engine, AnswerExtractor::default());
        let layout = SheetLayout {
            mask_areas: vec![Rect::new(0.0, 190.0, 100.0, 30.0)],
            ..Default::default()
        };
        let result = analyzer.analyze(&input(), &layout).await.unwrap();
        assert_eq!(result.extracted, vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_region_mode_does_not_fall_back_to_sheet_text() {
        let fragments = vec![
            TextFragment::new("1.(A)", 0.9, Some(BoundingBox::new(0.0, 0.0, 50.0, 10.0))),
            TextFragment::new("key:(B)", 0.9, Some(BoundingBox::new(0.0, 500.0, 50.0, 10.0))),
        ];
        let analyzer = AnswerSheetAnalyzer::new(FixedEngine(Ok(fragments)), AnswerExtractor::default());

        let outside = SheetLayout {
            regions: vec![Rect::new(1000.0, 1000.0, 50.0, 50.0)],
            ..Default::default()
        };
        let result = analyzer.analyze(&input(), &outside).await.unwrap();
        assert!(result.words.is_empty());
        assert!(result.extracted.is_empty());
        let per_region = analyzer.analyze_regions(&input(), &outside).await.unwrap();
        assert!(per_region[0].extracted.is_empty());

        let masked = SheetLayout {
            regions: vec![Rect::new(0.0, 490.0, 100.0, 30.0)],
            mask_areas: vec![Rect::new(0.0, 495.0, 100.0, 20.0)],
            mask_words: Vec::new(),
        };
        let result = analyzer.analyze(&input(), &masked).await.unwrap();
        assert!(result.words.is_empty());
        assert!(result.extracted.is_empty());
    }

    #[tokio::test]
    async fn test_no_text_is_empty_result() {
        let analyzer = AnswerSheetAnalyzer::new(FixedEngine(Err(|| OcrError::NoText)), AnswerExtractor::default());
        let result = analyzer.analyze(&input(), &SheetLayout::default()).await.unwrap();
        assert_eq!(result, Extraction::default());
    }

    #[tokio::test]
    async fn test_engine_errors_propagate() {
        let analyzer = AnswerSheetAnalyzer::new(
            FixedEngine(Err(|| OcrError::EngineError("boom".to_string()))),
            AnswerExtractor::default(),
        );
        let err = analyzer.analyze_regions(&input(), &SheetLayout::default()).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineError(_)));
    }
}
