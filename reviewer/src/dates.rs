//! Date recognition and normalisation to ISO-8601 (`YYYY-MM-DD`).
//!
//! Contracts write dates in many shapes ("2024-03-05", "05/03/2024",
//! "March 5th, 2024", "the 5th day of March 2024", "5 Maret 2024"). We try a
//! fixed cascade of explicit formats first and fall back to a permissive pass
//! that strips ordinals and filler words before retrying.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

/// Explicit formats, most specific first. Day-first numeric forms win over
/// month-first ones.
const EXPLICIT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

const FILLER_WORDS: &[&str] = &["the", "day", "of", "on", "tanggal", "dated"];

const MONTH_ALIASES: &[(&str, &str)] = &[
    ("januari", "january"),
    ("februari", "february"),
    ("pebruari", "february"),
    ("maret", "march"),
    ("mei", "may"),
    ("juni", "june"),
    ("juli", "july"),
    ("agustus", "august"),
    ("agu", "aug"),
    ("sept", "sep"),
    ("oktober", "october"),
    ("okt", "oct"),
    ("nopember", "november"),
    ("desember", "december"),
    ("des", "dec"),
];

lazy_static! {
    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref FOUR_DIGITS: Regex = Regex::new(r"\b\d{4}\b").unwrap();

    /// Date-shaped substrings worth handing to `normalize_date`.
    pub(crate) static ref DATE_CANDIDATE: Regex = Regex::new(
        r"(?ix)
        \b(?:
            \d{4}[-/.]\d{1,2}[-/.]\d{1,2}
          | \d{1,2}[-/.]\d{1,2}[-/.]\d{4}
          | \d{1,2}(?:st|nd|rd|th)?(?:\s+day)?(?:\s+of)?\s+(?:january|januari|february|februari|pebruari|march|maret|april|may|mei|june|juni|july|juli|august|agustus|september|october|oktober|november|nopember|december|desember|jan|feb|mar|apr|jun|jul|aug|agu|sept|sep|oct|okt|nov|dec|des)\.?,?\s+\d{4}
          | (?:january|januari|february|februari|pebruari|march|maret|april|may|mei|june|juni|july|juli|august|agustus|september|october|oktober|november|nopember|december|desember|jan|feb|mar|apr|jun|jul|aug|agu|sept|sep|oct|okt|nov|dec|des)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}
        )\b"
    )
    .unwrap();
}

/// Parse a date string and render it as `YYYY-MM-DD`.
/// Returns `None` when nothing in the cascade accepts the input.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = WHITESPACE.replace_all(raw.trim(), " ");
    if trimmed.is_empty() {
        return None;
    }

    parse_explicit(&trimmed).or_else(|| parse_permissive(&trimmed))
}

/// First date anywhere in `text` that survives normalisation.
pub fn find_first_date(text: &str) -> Option<String> {
    DATE_CANDIDATE
        .find_iter(text)
        .find_map(|m| normalize_date(m.as_str()))
}

/// chrono's `%Y` takes one to four digits and lets `%d` borrow digits from
/// the year, so a parse only counts when the input spells out its year.
fn parse_explicit(input: &str) -> Option<NaiveDate> {
    EXPLICIT_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .find(|date| has_full_year(input, date.year()))
}

fn has_full_year(input: &str, year: i32) -> bool {
    (1000..=9999).contains(&year)
        && FOUR_DIGITS
            .find_iter(input)
            .any(|m| m.as_str() == year.to_string())
}

fn parse_permissive(input: &str) -> Option<NaiveDate> {
    let mut cleaned = input.to_lowercase();
    cleaned = ORDINAL_SUFFIX.replace_all(&cleaned, "$1").into_owned();
    cleaned = cleaned.replace(',', " ");
    if cleaned.chars().any(|c| c.is_alphabetic()) {
        cleaned = cleaned.replace('.', " ");
    }

    let words: Vec<String> = cleaned
        .split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(w))
        .map(|w| {
            MONTH_ALIASES
                .iter()
                .find(|(alias, _)| *alias == w)
                .map(|(_, month)| month.to_string())
                .unwrap_or_else(|| w.to_string())
        })
        .collect();

    if words.is_empty() {
        return None;
    }

    parse_explicit(&words.join(" "))
}
