//! Integration tests for the scoresheet-rs library API

#[test]
fn test_prelude_imports() {
    // This test verifies that the prelude module exports everything correctly
    use scoresheet_rs::prelude::*;

    assert_eq!(normalize_text("（A）， "), "(A)");
    assert_eq!(normalize_latex_fraction(r"\frac{1}{2}"), "1/2");
    assert_eq!(extract_bracket_answers("结果是(3/4)，下一题(B)"), vec!["3/4", "B"]);

    let region = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(rectangles_overlap(&region, &Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert_eq!(subtract_masks(&[region], &[]), vec![region]);

    let result = grade(&[Question::new("A", 10.0, QuestionType::Choice)], &["a"]);
    assert_eq!(result.percentage, 100);
}

#[test]
fn test_extraction_end_to_end() {
    use scoresheet_rs::{AnswerExtractor, BoundingBox, Rect, SheetLayout, TextFragment};

    let fragments = vec![
        TextFragment::new("1.(C)", 0.98, Some(BoundingBox::new(20.0, 20.0, 60.0, 18.0))),
        TextFragment::new("参考答案(D)", 0.99, Some(BoundingBox::new(400.0, 20.0, 120.0, 18.0))),
        TextFragment::new("2.（√）", 0.95, Some(BoundingBox::new(20.0, 80.0, 60.0, 18.0))),
    ];
    let layout = SheetLayout {
        regions: vec![Rect::new(0.0, 0.0, 600.0, 120.0)],
        mask_areas: vec![Rect::new(380.0, 0.0, 220.0, 60.0)],
        mask_words: Vec::new(),
    };

    let extraction = AnswerExtractor::default().extract(&fragments, &layout, "");
    assert_eq!(extraction.extracted, vec!["C", "√"]);
    assert!(extraction.words.iter().all(|w| !w.text.contains("参考答案")));
}

#[test]
fn test_grading_from_extraction() {
    use scoresheet_rs::{grade_detailed, Question, QuestionType};

    let key = vec![
        Question::new("C", 4.0, QuestionType::Choice),
        Question::new("√", 2.0, QuestionType::Judge),
        Question::new("3/4", 4.0, QuestionType::Fill),
    ];
    let extracted = vec!["c".to_string(), "v".to_string(), "3/5".to_string()];
    let report = grade_detailed(&key, &extracted);

    assert_eq!(report.result.score, 6.0);
    assert_eq!(report.result.total_score, 10.0);
    assert_eq!(report.result.percentage, 60);
    assert_eq!(report.outcomes.iter().filter(|o| o.correct).count(), 2);
}

#[test]
fn test_config_module() {
    // This test verifies the config module is publicly accessible
    use scoresheet_rs::config::ScoresheetConfig;

    let config = ScoresheetConfig::from_toml_str("[extraction]\nmax_token_chars = 3").unwrap();
    let extractor = config.extractor();
    let tokens = extractor.extract_answers(&[], &[], &[], "(abcd)(abc)");
    assert_eq!(tokens, vec!["abc"]);
}

#[test]
fn test_vendor_response_through_extractor() {
    use scoresheet_ocr::parse_response;
    use scoresheet_rs::{AnswerExtractor, SheetLayout};

    let output = parse_response(
        br#"{"results": [{"text": "1.(A)", "disp_line_poly": {"points": [{"x": 0, "y": 0}, {"x": 50, "y": 20}]}}]}"#,
    )
    .unwrap()
    .into_output()
    .unwrap();

    let extraction = AnswerExtractor::default().extract(&output.fragments, &SheetLayout::default(), &output.text);
    assert_eq!(extraction.extracted, vec!["A"]);
}
