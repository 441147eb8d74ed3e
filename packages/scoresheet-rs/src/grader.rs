//! Exact-match grading against an answer key.

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum QuestionType {
    Choice,
    Judge,
    #[default]
    Fill,
}

impl From<Option<String>> for QuestionType {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("choice") => QuestionType::Choice,
            Some("judge") => QuestionType::Judge,
            _ => QuestionType::Fill,
        }
    }
}

/// One entry of the answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub answer: String,
    pub score: f64,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
}

impl Question {
    pub fn new(answer: impl Into<String>, score: f64, question_type: QuestionType) -> Self {
        Self {
            answer: answer.into(),
            score,
            question_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub score: f64,
    pub total_score: f64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub index: usize,
    pub expected: String,
    pub submitted: String,
    pub correct: bool,
    pub awarded: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    #[serde(flatten)]
    pub result: GradeResult,
    pub outcomes: Vec<QuestionOutcome>,
}

const JUDGE_TRUE: &[&str] = &["√", "v", "V", "✔", "t", "T", "true"];
const JUDGE_FALSE: &[&str] = &["×", "x", "X", "✖", "f", "F", "false"];

/// Canonical form of an answer for the given question type.
pub fn normalize_answer(answer: &str, question_type: QuestionType) -> String {
    let trimmed = answer.trim();
    match question_type {
        QuestionType::Judge => {
            if JUDGE_TRUE.contains(&trimmed) {
                "√".to_string()
            } else if JUDGE_FALSE.contains(&trimmed) {
                "×".to_string()
            } else {
                trimmed.to_string()
            }
        }
        QuestionType::Choice => trimmed.to_uppercase(),
        QuestionType::Fill => trimmed.to_string(),
    }
}

/// Rounded percentage; an answer key worth nothing scores 0%.
fn percentage(score: f64, total_score: f64) -> i64 {
    if total_score == 0.0 {
        return 0;
    }
    (score / total_score * 100.0).round() as i64
}

pub fn grade<S: AsRef<str>>(answers: &[Question], student_answers: &[S]) -> GradeResult {
    grade_detailed(answers, student_answers).result
}

/// Grades each question by index. Missing student answers count as empty.
pub fn grade_detailed<S: AsRef<str>>(answers: &[Question], student_answers: &[S]) -> GradeReport {
    let mut score = 0.0;
    let mut total_score = 0.0;

    let outcomes: Vec<QuestionOutcome> = answers
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let submitted = student_answers.get(index).map(|s| s.as_ref()).unwrap_or("");
            let expected = normalize_answer(&question.answer, question.question_type);
            let submitted = normalize_answer(submitted, question.question_type);
            let correct = expected == submitted;
            let awarded = if correct { question.score } else { 0.0 };

            total_score += question.score;
            score += awarded;

            QuestionOutcome {
                index,
                expected,
                submitted,
                correct,
                awarded,
            }
        })
        .collect();

    let result = GradeResult {
        score,
        total_score,
        percentage: percentage(score, total_score),
    };
    info!(score, total_score, percentage = result.percentage, "grade_done");

    GradeReport { result, outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_is_case_insensitive() {
        let key = vec![Question::new("A", 10.0, QuestionType::Choice)];
        let result = grade(&key, &["a"]);
        assert_eq!(
            result,
            GradeResult {
                score: 10.0,
                total_score: 10.0,
                percentage: 100
            }
        );
    }

    #[test]
    fn test_judge_aliases() {
        let key = vec![Question::new("√", 5.0, QuestionType::Judge)];
        assert_eq!(grade(&key, &["true"]).score, 5.0);
        assert_eq!(grade(&key, &[" ✔ "]).score, 5.0);
        assert_eq!(grade(&key, &["TRUE"]).score, 0.0);
        assert_eq!(normalize_answer("F", QuestionType::Judge), "×");
        assert_eq!(normalize_answer("", QuestionType::Judge), "");
    }

    #[test]
    fn test_fill_keeps_case() {
        let key = vec![Question::new("Paris", 4.0, QuestionType::Fill)];
        assert_eq!(grade(&key, &["paris"]).score, 0.0);
        assert_eq!(grade(&key, &["  Paris "]).score, 4.0);
    }

    #[test]
    fn test_missing_answers_are_empty() {
        let key = vec![
            Question::new("A", 2.0, QuestionType::Choice),
            Question::new("B", 3.0, QuestionType::Choice),
            Question::new("", 1.0, QuestionType::Fill),
        ];
        let report = grade_detailed(&key, &["A"]);
        assert_eq!(report.result.score, 3.0);
        assert_eq!(report.result.total_score, 6.0);
        assert_eq!(report.result.percentage, 50);
        assert!(!report.outcomes[1].correct);
        assert!(report.outcomes[2].correct);
    }

    #[test]
    fn test_empty_key_scores_zero_percent() {
        let result = grade::<&str>(&[], &[]);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.total_score, 0.0);

        let zero = vec![Question::new("A", 0.0, QuestionType::Choice)];
        assert_eq!(grade(&zero, &["A"]).percentage, 0);
    }

    #[test]
    fn test_type_defaults_to_fill() {
        let key: Vec<Question> = serde_json::from_str(
            r#"[{"answer": "x", "score": 1}, {"answer": "y", "score": 1, "type": "essay"}, {"answer": "z", "score": 1, "type": "judge"}]"#,
        )
        .unwrap();
        assert_eq!(key[0].question_type, QuestionType::Fill);
        assert_eq!(key[1].question_type, QuestionType::Fill);
        assert_eq!(key[2].question_type, QuestionType::Judge);
    }
}
