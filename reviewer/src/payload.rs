use crate::field_extractor::take_chars;
use crate::models::*;
use chrono::Utc;

pub const TRUNCATION_MARKER: &str = " …[truncated]";
pub const PAYLOAD_SOURCE: &str = "contract-reviewer";

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    let kept = take_chars(text, max_chars);
    if kept.len() == text.len() {
        text.to_string()
    } else {
        format!("{}{}", kept.trim_end(), TRUNCATION_MARKER)
    }
}

fn truncate_field(field: &Option<String>, max_chars: usize) -> Option<String> {
    field.as_deref().map(|text| truncate_excerpt(text, max_chars))
}

impl ReviewPayload {
    pub fn assemble(
        document: &Document,
        summary: ExtractedSummary,
        clauses: &ClauseExcerpts,
        findings: &[RiskFinding],
        risk_score: RiskScore,
        max_excerpt_chars: usize,
    ) -> Self {
        let clauses = ClauseExcerpts {
            services: truncate_field(&clauses.services, max_excerpt_chars),
            payment_terms: truncate_field(&clauses.payment_terms, max_excerpt_chars),
            termination: truncate_field(&clauses.termination, max_excerpt_chars),
            governing_law: truncate_field(&clauses.governing_law, max_excerpt_chars),
        };

        let risks = findings
            .iter()
            .filter(|f| f.present)
            .map(|f| RiskFinding {
                details: truncate_field(&f.details, max_excerpt_chars),
                ..f.clone()
            })
            .collect();

        Self {
            metadata: ReviewMetadata {
                review_id: document.id.clone(),
                filename: document.filename.clone(),
                generated_at: Utc::now().to_rfc3339(),
                character_count: document.content.chars().count(),
                source: PAYLOAD_SOURCE.to_string(),
            },
            summary,
            clauses,
            risks,
            risk_score,
        }
    }

    /// Short plain-text digest used as the `review_summary` of decisions.
    pub fn digest(&self) -> String {
        let mut lines = vec![format!(
            "Risk rating: {} (score {}, {} issue(s))",
            self.risk_score.rating, self.risk_score.score, self.risk_score.issues_found
        )];
        if let Some(title) = &self.summary.title {
            lines.push(format!("Title: {}", title));
        }
        if let Some(parties) = &self.summary.parties {
            lines.push(format!("Parties: {}", parties));
        }
        for risk in &self.risks {
            lines.push(format!("- {} [{}]", risk.name, risk.severity));
        }
        lines.join("\n")
    }
}
