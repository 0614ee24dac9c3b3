//! Heuristic field extraction for contract text.
//!
//! Every function here is total: a missing field is `None`, never an error.
//! Sections are located by anchor labels (tried in priority order, first
//! occurrence wins) and captured over a bounded window that stops at the next
//! recognised section heading.

use crate::dates::{find_first_date, DATE_CANDIDATE};
use crate::models::{ClauseExcerpts, ExtractedSummary};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

pub const MAX_TITLE_CHARS: usize = 120;
const TITLE_SCAN_LINES: usize = 10;
const TITLE_MAX_WORDS: usize = 12;
const DATE_WINDOW_CHARS: usize = 80;

/// Headings that end a captured section.
pub const SECTION_HEADINGS: &[&str] = &[
    "Scope of Services",
    "Scope of Work",
    "Services",
    "Payment Terms",
    "Payment",
    "Fees",
    "Compensation",
    "Term",
    "Termination",
    "Confidentiality",
    "Data Protection",
    "Intellectual Property",
    "Warranties",
    "Indemnification",
    "Limitation of Liability",
    "Liability",
    "Force Majeure",
    "Governing Law",
    "Applicable Law",
    "Dispute Resolution",
    "Jurisdiction",
    "Notices",
    "Entire Agreement",
    "Miscellaneous",
    "Signatures",
    "In Witness Whereof",
];

#[derive(Debug, Clone, Copy)]
pub struct AnchorRule {
    pub labels: &'static [&'static str],
    /// Maximum characters captured after the label.
    pub window: usize,
    pub single_line: bool,
    /// Only accept the label where it reads as a heading.
    pub heading_only: bool,
}

pub const SERVICES_RULE: AnchorRule = AnchorRule {
    labels: &["Scope of Services", "Scope of Work", "Services", "Ruang Lingkup"],
    window: 600,
    single_line: false,
    heading_only: false,
};

pub const PAYMENT_RULE: AnchorRule = AnchorRule {
    labels: &["Payment Terms", "Payment", "Fees", "Compensation", "Pembayaran"],
    window: 600,
    single_line: false,
    heading_only: false,
};

pub const TERMINATION_RULE: AnchorRule = AnchorRule {
    labels: &["Termination", "Pengakhiran"],
    window: 600,
    single_line: false,
    heading_only: false,
};

pub const GOVERNING_LAW_CLAUSE_RULE: AnchorRule = AnchorRule {
    labels: &["Governing Law", "Applicable Law", "Choice of Law", "Hukum yang Berlaku"],
    window: 400,
    single_line: false,
    heading_only: false,
};

const GOVERNING_LAW_RULE: AnchorRule = AnchorRule {
    labels: &["Governing Law", "Applicable Law", "Choice of Law", "Hukum yang Berlaku"],
    window: 160,
    single_line: true,
    heading_only: false,
};

const PARTIES_RULE: AnchorRule = AnchorRule {
    labels: &["Parties", "Para Pihak"],
    window: 240,
    single_line: true,
    heading_only: true,
};

const CONTRACT_DATE_LABELS: &[&str] = &[
    "Effective Date",
    "Commencement Date",
    "Date of Agreement",
    "Agreement Date",
    "Contract Date",
    "entered into on",
    "made on",
    "Dated",
    "Tanggal",
];

const END_DATE_LABELS: &[&str] = &[
    "Expiration Date",
    "Expiry Date",
    "End Date",
    "Termination Date",
    "expires on",
    "valid until",
    "sampai dengan",
    "hingga",
    "until",
];

/// Every label used by the rules above, compiled once.
const KNOWN_LABELS: &[&[&str]] = &[
    SERVICES_RULE.labels,
    PAYMENT_RULE.labels,
    TERMINATION_RULE.labels,
    GOVERNING_LAW_CLAUSE_RULE.labels,
    PARTIES_RULE.labels,
    CONTRACT_DATE_LABELS,
    END_DATE_LABELS,
];

struct LabelPatterns {
    /// Any whole-word occurrence.
    mention: Regex,
    /// The label opening a short heading line, or followed by a colon.
    heading: Regex,
}

impl LabelPatterns {
    fn new(label: &str) -> Option<Self> {
        let escaped = regex::escape(label);
        let mention = Regex::new(&format!(r"(?i)\b{}\b", escaped)).ok()?;
        let heading = Regex::new(&format!(
            r"(?im)^[ \t]*(?:(?:article|section|clause|pasal)[ \t]+)?(?:\d+(?:\.\d+)*\.?[ \t]*)?{0}\b[^\n.]{{0,60}}$|\b{0}[ \t]*:",
            escaped
        ))
        .ok()?;
        Some(Self { mention, heading })
    }
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref TITLE_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:agreement|contract|perjanjian|kontrak|memorandum|addendum|terms\s+of\s+service|nda)\b"
    )
    .unwrap();
    static ref BETWEEN_PARTIES: Regex = Regex::new(
        r"(?is)\bbetween\s+(.{2,160}?)\s*,?\s+and\s+(.{2,160}?)\s*(?:\(|,|;|\.\s|\.$|\n|$)"
    )
    .unwrap();
    static ref PARENTHETICAL: Regex = Regex::new(r"\([^)]*\)").unwrap();
    static ref PARTY_SEPARATOR: Regex = Regex::new(r"(?i)\s+(?:and|dan)\s+").unwrap();
    static ref LAWS_OF: Regex = Regex::new(
        r"(?i)\blaws?\s+of\s+(?:the\s+)?([^.;,\n]{2,80}?)(?:\s+(?:and|with|without|excluding|except)\s|[.;,\n]|$)"
    )
    .unwrap();
    static ref GOVERNED_BY: Regex = Regex::new(
        r"(?i)governed\s+by\s+(?:and\s+construed\s+in\s+accordance\s+with\s+)?(?:the\s+)?laws?\s+of\s+(?:the\s+)?([^.;,\n]{2,80}?)(?:\s+(?:and|with|without|excluding|except)\s|[.;,\n]|$)"
    )
    .unwrap();
    static ref LABEL_PATTERNS: HashMap<&'static str, LabelPatterns> = KNOWN_LABELS
        .iter()
        .flat_map(|labels| labels.iter())
        .filter_map(|&label| Some((label, LabelPatterns::new(label)?)))
        .collect();
    static ref STOP_HEADINGS: Vec<(&'static str, LabelPatterns)> = SECTION_HEADINGS
        .iter()
        .filter_map(|&heading| Some((heading, LabelPatterns::new(heading)?)))
        .collect();
}

pub fn extract_summary(text: &str, filename: &str) -> ExtractedSummary {
    ExtractedSummary {
        title: extract_title(text, filename),
        parties: extract_parties(text),
        contract_date: extract_contract_date(text),
        end_date: extract_end_date(text),
        governing_law: extract_governing_law(text),
    }
}

pub fn extract_clauses(text: &str) -> ClauseExcerpts {
    ClauseExcerpts {
        services: extract_services(text),
        payment_terms: extract_payment_terms(text),
        termination: extract_termination(text),
        governing_law: capture_after_anchor(text, &GOVERNING_LAW_CLAUSE_RULE),
    }
}

/// Title line near the top of the document, falling back to the file name.
pub fn extract_title(text: &str, filename: &str) -> Option<String> {
    let head: Vec<String> = text
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .take(TITLE_SCAN_LINES)
        .collect();

    let named = head
        .iter()
        .find(|line| looks_like_heading(line) && TITLE_KEYWORD.is_match(line));
    let first = head.iter().find(|line| {
        line.chars().count() <= MAX_TITLE_CHARS && line.chars().any(|c| c.is_alphabetic())
    });

    named
        .or(first)
        .cloned()
        .or_else(|| title_from_filename(filename))
}

/// Short line without sentence punctuation at the end.
fn looks_like_heading(line: &str) -> bool {
    line.chars().count() <= MAX_TITLE_CHARS
        && line.split_whitespace().count() <= TITLE_MAX_WORDS
        && !line.ends_with(['.', ';', ','])
}

fn title_from_filename(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    let title = collapse_whitespace(&stem.replace(['_', '-'], " "));
    if title.is_empty() {
        None
    } else {
        Some(take_chars(&title, MAX_TITLE_CHARS).to_string())
    }
}

pub fn extract_parties(text: &str) -> Option<String> {
    if let Some(caps) = BETWEEN_PARTIES.captures(text) {
        let first = clean_party(caps.get(1).map_or("", |m| m.as_str()));
        let second = clean_party(caps.get(2).map_or("", |m| m.as_str()));
        if !first.is_empty() && !second.is_empty() {
            return Some(format!("{}; {}", first, second));
        }
    }

    let listed = capture_after_anchor(text, &PARTIES_RULE)?;
    let parts: Vec<String> = PARTY_SEPARATOR
        .split(&listed)
        .map(clean_party)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn clean_party(raw: &str) -> String {
    let without_notes = PARENTHETICAL.replace_all(raw, " ");
    let unquoted = without_notes.replace(['"', '\u{201c}', '\u{201d}'], "");
    collapse_whitespace(&unquoted)
        .trim_end_matches([',', ';', '.', ':'])
        .trim()
        .to_string()
}

pub fn extract_contract_date(text: &str) -> Option<String> {
    anchored_date(text, CONTRACT_DATE_LABELS).or_else(|| find_first_date(text))
}

pub fn extract_end_date(text: &str) -> Option<String> {
    anchored_date(text, END_DATE_LABELS)
}

fn anchored_date(text: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        let start = find_anchor(text, label, false)?;
        let window = take_chars(&text[start..], DATE_WINDOW_CHARS);
        let candidate = DATE_CANDIDATE.find(window)?;
        crate::dates::normalize_date(candidate.as_str())
    })
}

pub fn extract_governing_law(text: &str) -> Option<String> {
    let from_heading = capture_after_anchor(text, &GOVERNING_LAW_RULE).map(|line| {
        LAWS_OF
            .captures(&line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or(line)
    });

    from_heading
        .or_else(|| {
            GOVERNED_BY
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .map(|law| tidy_jurisdiction(&law))
        .filter(|law| !law.is_empty())
}

fn tidy_jurisdiction(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let trimmed = collapsed.trim_end_matches(['.', ',', ';', ':']).trim();
    trimmed
        .strip_prefix("the ")
        .or_else(|| trimmed.strip_prefix("The "))
        .unwrap_or(trimmed)
        .to_string()
}

pub fn extract_services(text: &str) -> Option<String> {
    capture_after_anchor(text, &SERVICES_RULE)
}

pub fn extract_payment_terms(text: &str) -> Option<String> {
    capture_after_anchor(text, &PAYMENT_RULE)
}

pub fn extract_termination(text: &str) -> Option<String> {
    capture_after_anchor(text, &TERMINATION_RULE)
}

/// Capture the text following the first label of `rule` found in `text`.
pub fn capture_after_anchor(text: &str, rule: &AnchorRule) -> Option<String> {
    rule.labels.iter().find_map(|label| {
        let start = find_anchor(text, label, rule.heading_only)?;
        capture_window(&text[start..], rule)
    })
}

/// Byte offset just past the first occurrence of `label`. Rules marked
/// `heading_only` skip mentions in running text.
fn find_anchor(text: &str, label: &str, heading_only: bool) -> Option<usize> {
    let compiled;
    let patterns = match LABEL_PATTERNS.get(label) {
        Some(patterns) => patterns,
        None => {
            compiled = LabelPatterns::new(label)?;
            &compiled
        }
    };

    if heading_only {
        let m = patterns.heading.find(text)?;
        return patterns.mention.find_at(text, m.start()).map(|m| m.end());
    }
    patterns.mention.find(text).map(|m| m.end())
}

fn capture_window(rest: &str, rule: &AnchorRule) -> Option<String> {
    let body = rest.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | '.' | ')' | '\u{2013}' | '\u{2014}')
    });
    let mut slice = take_chars(body, rule.window);

    if rule.single_line {
        if let Some(pos) = slice.find('\n') {
            slice = &slice[..pos];
        }
    }
    if let Some(cut) = first_stop_heading(slice, rule.labels) {
        slice = &slice[..cut];
    }

    let collapsed = collapse_whitespace(slice);
    let cleaned = collapsed.trim_end_matches([',', ';', ':', '-']).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

fn first_stop_heading(slice: &str, own_labels: &[&str]) -> Option<usize> {
    STOP_HEADINGS
        .iter()
        .filter(|(heading, _)| !own_labels.iter().any(|own| own.eq_ignore_ascii_case(heading)))
        .filter_map(|(_, patterns)| {
            patterns
                .heading
                .find_iter(slice)
                .map(|m| m.start())
                .find(|&pos| pos > 0)
        })
        .min()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub(crate) fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
