//! Rule table of contract risk patterns.
//!
//! Each rule yields exactly one [`RiskFinding`] per document. Rules flagged
//! `invert_presence` describe protective clauses: the risk is their absence.

use crate::field_extractor::collapse_whitespace;
use crate::models::{RiskFinding, Severity};
use lazy_static::lazy_static;
use regex::Regex;

pub const MISSING_CLAUSE_MESSAGE: &str = "Clause appears missing from the document.";

/// Characters kept on each side of a match in the finding snippet.
pub const SNIPPET_RADIUS: usize = 80;

#[derive(Debug)]
pub struct RiskPattern {
    pub name: &'static str,
    pub pattern: Regex,
    pub severity: Severity,
    pub invert_presence: bool,
    /// Severity drops to Low when the governing law is local.
    pub jurisdiction_sensitive: bool,
}

impl RiskPattern {
    fn new(name: &'static str, pattern: &str, severity: Severity) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            severity,
            invert_presence: false,
            jurisdiction_sensitive: false,
        }
    }

    fn missing_clause(mut self) -> Self {
        self.invert_presence = true;
        self
    }

    fn jurisdiction_sensitive(mut self) -> Self {
        self.jurisdiction_sensitive = true;
        self
    }
}

lazy_static! {
    pub static ref RISK_PATTERNS: Vec<RiskPattern> = vec![
        RiskPattern::new(
            "Auto-renewal",
            r"(?i)\bauto(?:matic(?:ally)?)?[\s-]?renew(?:al|s|ed)?\b",
            Severity::Medium,
        ),
        RiskPattern::new(
            "Unlimited liability",
            r"(?i)\bunlimited\s+liabilit(?:y|ies)\b|\bliability\s+(?:shall\s+be\s+|is\s+)?unlimited\b",
            Severity::High,
        ),
        RiskPattern::new(
            "Penalties/Liquidated damages",
            r"(?i)\bliquidated\s+damages\b|\bpenalt(?:y|ies)\b|\bdenda\b",
            Severity::Medium,
        ),
        RiskPattern::new(
            "Unilateral termination",
            r"(?i)\bterminat\w*\s+(?:this\s+agreement\s+)?(?:at\s+any\s+time|for\s+convenience|without\s+cause)\b",
            Severity::Medium,
        ),
        RiskPattern::new(
            "Indemnification",
            r"(?i)\bindemnif(?:y|ies|ied|ication)\b|\bhold\s+harmless\b",
            Severity::Medium,
        ),
        RiskPattern::new(
            "Non-compete",
            r"(?i)\bnon[\s-]?compet(?:e|ition)\b",
            Severity::Medium,
        ),
        RiskPattern::new(
            "Exclusivity",
            r"(?i)\bexclusiv(?:e|ity)\s+(?:rights?|supplier|provider|dealings?|arrangement)\b|\bon\s+an\s+exclusive\s+basis\b",
            Severity::Low,
        ),
        RiskPattern::new(
            "Late payment interest",
            r"(?i)\blate\s+payment\b|\binterest\s+(?:at|of)\s+\d+(?:\.\d+)?\s*%",
            Severity::Low,
        ),
        RiskPattern::new(
            "Jurisdiction far",
            r"(?i)\bgoverned\s+by\s+(?:and\s+construed\s+in\s+accordance\s+with\s+)?(?:the\s+)?laws?\s+of\b|\bexclusive\s+jurisdiction\b|\bcourts?\s+of\b|\barbitration\s+in\b",
            Severity::Medium,
        )
        .jurisdiction_sensitive(),
        RiskPattern::new(
            "Confidentiality missing",
            r"(?i)\bconfidential(?:ity)?\b|\bnon[\s-]?disclosure\b|\bkerahasiaan\b",
            Severity::High,
        )
        .missing_clause(),
        RiskPattern::new(
            "Data protection missing",
            r"(?i)\bdata\s+protection\b|\bpersonal\s+data\b|\bprivacy\b|\bgdpr\b|\bpelindungan\s+data\b",
            Severity::Medium,
        )
        .missing_clause(),
    ];
}

pub struct RiskDetector {
    local_jurisdictions: Vec<String>,
}

impl RiskDetector {
    pub fn new(local_jurisdictions: &[String]) -> Self {
        Self {
            local_jurisdictions: local_jurisdictions
                .iter()
                .map(|token| token.trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    /// One finding per rule, in table order.
    pub fn detect(&self, text: &str, governing_law: Option<&str>) -> Vec<RiskFinding> {
        let local = governing_law.map_or(false, |law| self.is_local(law));

        RISK_PATTERNS
            .iter()
            .map(|rule| {
                let found = rule.pattern.find(text);
                let present = found.is_some() != rule.invert_presence;

                let details = if rule.invert_presence {
                    present.then(|| MISSING_CLAUSE_MESSAGE.to_string())
                } else {
                    found.map(|m| snippet_around(text, m.start(), m.end(), SNIPPET_RADIUS))
                };

                let severity = if rule.jurisdiction_sensitive && local {
                    Severity::Low
                } else {
                    rule.severity
                };

                log::debug!("risk '{}': present={} severity={}", rule.name, present, severity);

                RiskFinding {
                    name: rule.name.to_string(),
                    present,
                    details,
                    severity,
                }
            })
            .collect()
    }

    fn is_local(&self, governing_law: &str) -> bool {
        let law = governing_law.to_lowercase();
        self.local_jurisdictions.iter().any(|token| law.contains(token.as_str()))
    }
}

/// Text around a match, whitespace-collapsed, with ellipses where cut.
pub fn snippet_around(text: &str, start: usize, end: usize, radius: usize) -> String {
    let before_start = text[..start]
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map_or(0, |(idx, _)| idx);
    let after_end = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(idx, _)| end + idx);

    let mut snippet = collapse_whitespace(&text[before_start..after_end]);
    if before_start > 0 {
        snippet.insert_str(0, "...");
    }
    if after_end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn detector() -> RiskDetector {
        RiskDetector::new(&["indonesia".to_string()])
    }

    fn finding<'a>(findings: &'a [RiskFinding], name: &str) -> &'a RiskFinding {
        findings.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn one_finding_per_rule() {
        let findings = detector().detect("", None);
        assert_eq!(findings.len(), RISK_PATTERNS.len());
        let names: Vec<_> = findings.iter().map(|f| f.name.as_str()).collect();
        let expected: Vec<_> = RISK_PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_confidentiality_is_present_risk() {
        let findings = detector().detect("The supplier will deliver goods.", None);
        let conf = finding(&findings, "Confidentiality missing");
        assert!(conf.present);
        assert_eq!(conf.severity, Severity::High);
        assert_eq!(conf.details.as_deref(), Some(MISSING_CLAUSE_MESSAGE));
    }

    #[test]
    fn confidentiality_clause_clears_risk() {
        let findings = detector().detect("7. Confidentiality. Each party keeps secrets.", None);
        let conf = finding(&findings, "Confidentiality missing");
        assert!(!conf.present);
        assert_eq!(conf.details, None);
    }

    #[test]
    fn ordinary_rule_carries_snippet() {
        let text = "This Agreement will auto-renewal each year unless cancelled.";
        let findings = detector().detect(text, None);
        let renewal = finding(&findings, "Auto-renewal");
        assert!(renewal.present);
        assert!(renewal.details.as_deref().unwrap().contains("auto-renewal"));
    }

    #[test]
    fn local_governing_law_downgrades_jurisdiction() {
        let text = "This Agreement is governed by the laws of Republic of Indonesia.";
        let local = detector().detect(text, Some("Republic of Indonesia"));
        let far = detector().detect(text, Some("Singapore"));
        assert_eq!(finding(&local, "Jurisdiction far").severity, Severity::Low);
        assert_eq!(finding(&far, "Jurisdiction far").severity, Severity::Medium);
        assert!(finding(&local, "Jurisdiction far").present);
    }

    #[test]
    fn no_liquidated_damages_wording_means_absent() {
        let text = "Governing Law: Republic of Indonesia\nThis Agreement is governed by the laws of Republic of Indonesia.";
        let findings = detector().detect(text, Some("Republic of Indonesia"));
        let penalties = finding(&findings, "Penalties/Liquidated damages");
        assert!(!penalties.present);
        assert_eq!(penalties.details, None);
    }

    #[test]
    fn snippet_marks_truncation() {
        let text = format!("{}unlimited liability{}", "a ".repeat(100), " b".repeat(100));
        let start = text.find("unlimited").unwrap();
        let snippet = snippet_around(&text, start, start + "unlimited liability".len(), 10);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert!(snippet.contains("unlimited liability"));
    }

    #[test]
    fn snippet_handles_multibyte_text() {
        let text = "Pihak Pertama — “unlimited liability” — berlaku.";
        let start = text.find("unlimited").unwrap();
        let snippet = snippet_around(text, start, start + "unlimited liability".len(), 3);
        assert!(snippet.contains("unlimited liability"));
    }

    proptest! {
        #[test]
        fn confidentiality_polarity(text in "[a-z ]{0,200}") {
            prop_assume!(!text.contains("confidential"));
            prop_assume!(!text.contains("disclosure"));
            prop_assume!(!text.contains("kerahasiaan"));
            let findings = detector().detect(&text, None);
            prop_assert!(finding(&findings, "Confidentiality missing").present);

            let with_clause = format!("{} confidentiality {}", text, text);
            let findings = detector().detect(&with_clause, None);
            prop_assert!(!finding(&findings, "Confidentiality missing").present);
        }
    }
}
