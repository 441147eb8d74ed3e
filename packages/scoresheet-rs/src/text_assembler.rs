//! Joins recognized fragments into text and folds OCR artifacts away before comparison.
use regex::Regex;
use scoresheet_ocr::TextFragment;
use std::sync::OnceLock;

/// `\frac{a}{b}` with digit-only numerator and denominator
static FRACTION_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn fraction_pattern() -> Option<&'static Regex> {
  FRACTION_PATTERN
    .get_or_init(|| Regex::new(r"\\frac\s*\{\s*([0-9]+)\s*\}\s*\{\s*([0-9]+)\s*\}").ok())
    .as_ref()
}

/// Concatenates fragment text in the order the OCR vendor returned it.
pub fn build_text<'a, I>(fragments: I) -> String
where
  I: IntoIterator<Item = &'a TextFragment>,
{
  fragments.into_iter().map(|f| f.text.as_str()).collect()
}

/// Rewrites `\frac{3}{4}` as `3/4`.
pub fn normalize_latex_fraction(s: &str) -> String {
  match fraction_pattern() {
    Some(re) => re.replace_all(s, "$1/$2").into_owned(),
    None => s.to_string(),
  }
}

fn fold_char(c: char) -> Option<char> {
  match c {
    c if c.is_whitespace() => None,
    '，' | '。' | '、' | '．' => None,
    '（' | '〈' | '⟨' => Some('('),
    '）' | '〉' | '⟩' => Some(')'),
    '：' => Some(':'),
    c => Some(c),
  }
}

/// Normalizes OCR output for comparison:
/// 1. LaTeX fractions become `a/b`
/// 2. Whitespace and full-width comma/period/enumeration marks are dropped
/// 3. Full-width and angle brackets become ASCII parentheses, `：` becomes `:`
///
/// The fraction pass runs again at the end for fractions that only line up
/// once whitespace is gone, which keeps the function idempotent.
pub fn normalize_text(s: &str) -> String {
  let folded: String = normalize_latex_fraction(s).chars().filter_map(fold_char).collect();
  normalize_latex_fraction(&folded)
}
