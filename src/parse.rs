//! Best-effort pattern matching over question text.
//!
//! A small ordered list of regex rules, each independently testable. The
//! parser never fails: anything it cannot extract falls back to a default.

use once_cell::sync::Lazy;
use regex::Regex;

/// Extracted parameters of a compare-rainfall question.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    pub regions: Vec<String>,
    pub lookback_years: i32,
    pub top_n: usize,
}

pub const DEFAULT_LOOKBACK_YEARS: i32 = 5;
pub const DEFAULT_TOP_N: usize = 3;

// Region list between the literal words "in" and "for".
static RE_REGION_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"in\s+([A-Za-z,\s]+?)\s+for").unwrap());
// Splits the captured span on the word "and" without splitting words that
// merely contain it (e.g. Nagaland).
static RE_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\band\b").unwrap());
// Fallback: proper-noun-like words anywhere in the text.
static RE_PROPER_NOUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").unwrap());
static RE_TOP_N: Lazy<Regex> = Lazy::new(|| Regex::new(r"top\s+(\d+)").unwrap());
static RE_LAST_YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"last\s+(\d+)\s+years").unwrap());

/// Pull region names, lookback window and top-N count out of a question
/// like "Compare rainfall in Maharashtra and Karnataka for the last 5 years
/// and list top 3 cereals".
///
/// The fallback region scan is best-effort and may capture words that are
/// not regions; callers get empty filter results for those, not errors.
pub fn parse_compare_rainfall_question(question: &str) -> ParsedQuestion {
    let regions = match RE_REGION_SPAN.captures(question) {
        Some(caps) => RE_AND
            .split(caps.get(1).map_or("", |m| m.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => RE_PROPER_NOUN
            .find_iter(question)
            .map(|m| m.as_str().to_string())
            .collect(),
    };

    let top_n = RE_TOP_N
        .captures(question)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_TOP_N);

    let lookback_years = RE_LAST_YEARS
        .captures(question)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_LOOKBACK_YEARS);

    ParsedQuestion {
        regions,
        lookback_years,
        top_n,
    }
}
