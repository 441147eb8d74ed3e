//! Invariants of geometry, normalization and grading checked over small grids.

use scoresheet_rs::prelude::*;

fn sample_rects() -> Vec<Rect> {
    let mut rects = Vec::new();
    for x in [0.0, 15.0, 40.0, 90.0] {
        for y in [0.0, 25.0, 70.0] {
            for (w, h) in [(10.0, 10.0), (30.0, 60.0), (120.0, 20.0), (0.0, 15.0)] {
                rects.push(Rect::new(x, y, w, h));
            }
        }
    }
    rects
}

#[test]
fn normalization_is_idempotent() {
    let samples = [
        "",
        "   ",
        "结果是（3/4），下一题 (B)。",
        r"\frac{1}{2} + \frac { 3 } { 4 }",
        r"\frac{1 2}{3}",
        r"\fr ac{5}{6}",
        "答：〈A〉、⟨B⟩．",
        r"\frac{\frac{1}{2}}{3}",
        "((A))(B",
    ];
    for s in samples {
        let once = normalize_text(s);
        assert_eq!(normalize_text(&once), once, "input: {:?}", s);
    }
}

#[test]
fn subtraction_cells_stay_inside_region_and_outside_masks() {
    let region = Rect::new(20.0, 10.0, 100.0, 80.0);
    for mask in sample_rects() {
        let masks = [mask];
        let cells = subtract_masks(&[region], &masks);
        let fully_covered = mask.x <= region.x
            && mask.y <= region.y
            && mask.right() >= region.right()
            && mask.bottom() >= region.bottom();
        if fully_covered {
            assert_eq!(cells, vec![region]);
            continue;
        }
        for cell in &cells {
            assert!(cell.x >= region.x && cell.right() <= region.right(), "{:?} / {:?}", cell, mask);
            assert!(cell.y >= region.y && cell.bottom() <= region.bottom(), "{:?} / {:?}", cell, mask);
            assert!(!rectangles_overlap(cell, &mask), "{:?} overlaps {:?}", cell, mask);
            assert!(cell.width > 0.0 && cell.height > 0.0);
        }
    }
}

#[test]
fn non_overlapping_masks_leave_region_untouched() {
    let region = Rect::new(200.0, 200.0, 50.0, 50.0);
    let masks: Vec<Rect> = sample_rects()
        .into_iter()
        .filter(|m| !rectangles_overlap(m, &region))
        .collect();
    assert!(!masks.is_empty());
    assert_eq!(subtract_masks(&[region], &masks), vec![region]);
}

#[test]
fn masked_fragments_never_survive() {
    let fragments: Vec<TextFragment> = sample_rects()
        .into_iter()
        .enumerate()
        .map(|(i, r)| TextFragment::new(format!("({})", i), 0.9, Some(BoundingBox::from(r))))
        .collect();
    let masks = vec![Rect::new(10.0, 20.0, 40.0, 30.0), Rect::new(85.0, 65.0, 10.0, 10.0)];

    let kept = filter_by_masks(&fragments, &masks);
    for fragment in &kept {
        let bbox = Rect::from(fragment.position.unwrap());
        assert!(masks.iter().all(|m| !rectangles_overlap(&bbox, m)), "{:?}", fragment);
    }

    let layout = SheetLayout {
        regions: vec![Rect::new(0.0, 0.0, 300.0, 300.0)],
        mask_areas: masks.clone(),
        mask_words: Vec::new(),
    };
    let extraction = AnswerExtractor::default().extract(&fragments, &layout, "");
    for word in &extraction.words {
        assert!(!is_masked(word, &masks));
    }
}

#[test]
fn grading_examples() {
    let choice = grade(&[Question::new("A", 10.0, QuestionType::Choice)], &["a"]);
    assert_eq!((choice.score, choice.total_score, choice.percentage), (10.0, 10.0, 100));

    let judge = grade(&[Question::new("√", 5.0, QuestionType::Judge)], &["true"]);
    assert_eq!((judge.score, judge.total_score, judge.percentage), (5.0, 5.0, 100));

    let empty = grade::<String>(&[], &[]);
    assert_eq!(empty.percentage, 0);
}

#[test]
fn mask_word_exclusion() {
    let tokens = vec!["A".to_string(), "B".to_string()];
    assert_eq!(drop_mask_words(tokens, &["A".to_string()]), vec!["B".to_string()]);
}
