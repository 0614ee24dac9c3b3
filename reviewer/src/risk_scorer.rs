use crate::config::ScoringConfig;
use crate::models::{RiskFinding, RiskScore, Severity};

pub fn severity_weight(severity: Severity, config: &ScoringConfig) -> u32 {
    match severity {
        Severity::Low => config.low_weight,
        Severity::Medium => config.medium_weight,
        Severity::High => config.high_weight,
    }
}

pub fn rating_for(score: u32, config: &ScoringConfig) -> Severity {
    if score >= config.high_threshold {
        Severity::High
    } else if score >= config.medium_threshold {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Sum the weights of present findings and rate the total.
pub fn score_findings(findings: &[RiskFinding], config: &ScoringConfig) -> RiskScore {
    let present = findings.iter().filter(|f| f.present);
    let score = present
        .clone()
        .map(|f| severity_weight(f.severity, config))
        .fold(0u32, u32::saturating_add);

    RiskScore {
        score,
        rating: rating_for(score, config),
        issues_found: present.count(),
    }
}
