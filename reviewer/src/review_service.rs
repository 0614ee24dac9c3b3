use crate::config::ReviewConfig;
use crate::document_processor::DocumentProcessor;
use crate::error::{ReviewResult, TransportError};
use crate::field_extractor::{extract_clauses, extract_summary};
use crate::models::*;
use crate::risk_detector::RiskDetector;
use crate::risk_scorer::score_findings;
use crate::webhook_service::WebhookService;
use std::path::Path;

/// A finished review plus, when a webhook is configured, the delivery result.
/// A failed delivery leaves the payload in `report` for manual retry.
#[derive(Debug)]
pub struct ReviewOutcome {
    pub report: ReviewReport,
    pub delivery: Option<Result<WebhookResponse, TransportError>>,
}

pub struct ReviewService {
    config: ReviewConfig,
    processor: DocumentProcessor,
    detector: RiskDetector,
    webhook: WebhookService,
}

impl ReviewService {
    pub fn new(config: ReviewConfig) -> ReviewResult<Self> {
        config.validate()?;
        let webhook = WebhookService::new(config.request_timeout)?;
        let detector = RiskDetector::new(&config.local_jurisdictions);

        Ok(Self {
            config,
            processor: DocumentProcessor::new(),
            detector,
            webhook,
        })
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn webhook(&self) -> &WebhookService {
        &self.webhook
    }

    pub fn review_file(&self, path: &Path) -> ReviewResult<ReviewReport> {
        let document = self.processor.load_file(path)?;
        Ok(self.review_document(&document))
    }

    pub fn review_bytes(&self, filename: &str, bytes: &[u8]) -> ReviewResult<ReviewReport> {
        let document = self.processor.load_bytes(filename, bytes)?;
        Ok(self.review_document(&document))
    }

    pub fn review_document(&self, document: &Document) -> ReviewReport {
        let start_time = std::time::Instant::now();

        let summary = extract_summary(&document.content, &document.filename);
        let clauses = extract_clauses(&document.content);
        let findings = self
            .detector
            .detect(&document.content, summary.governing_law.as_deref());
        let risk_score = score_findings(&findings, &self.config.scoring);

        log::info!(
            "Reviewed {}: score {} ({}), {} issue(s)",
            document.filename,
            risk_score.score,
            risk_score.rating,
            risk_score.issues_found
        );

        let payload = ReviewPayload::assemble(
            document,
            summary,
            &clauses,
            &findings,
            risk_score,
            self.config.max_excerpt_chars,
        );

        ReviewReport {
            payload,
            findings,
            processing_time_ms: start_time.elapsed().as_millis(),
        }
    }

    /// Review a file and, if a webhook URL is configured, POST the payload once.
    pub async fn review_and_submit(&self, path: &Path) -> ReviewResult<ReviewOutcome> {
        let report = self.review_file(path)?;
        let delivery = self.submit(&report.payload).await;
        Ok(ReviewOutcome { report, delivery })
    }

    pub async fn submit(
        &self,
        payload: &ReviewPayload,
    ) -> Option<Result<WebhookResponse, TransportError>> {
        let url = self.config.webhook_url.as_deref()?;
        let result = self.webhook.send_review(url, payload).await;
        if let Err(e) = &result {
            log::warn!("Review {} was not delivered: {}", payload.metadata().review_id, e);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;

    fn service() -> ReviewService {
        ReviewService::new(ReviewConfig::default()).unwrap()
    }

    fn review(text: &str) -> ReviewReport {
        service().review_bytes("contract.txt", text.as_bytes()).unwrap()
    }

    fn finding<'a>(report: &'a ReviewReport, name: &str) -> &'a RiskFinding {
        report.findings.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn indonesian_governing_law_without_penalties() {
        let report = review(
            "Governing Law: Republic of Indonesia\n\
             This Agreement is governed by the laws of Republic of Indonesia.\n",
        );
        assert_eq!(
            report.payload.summary().governing_law.as_deref(),
            Some("Republic of Indonesia")
        );
        assert!(!finding(&report, "Penalties/Liquidated damages").present);
        assert_eq!(finding(&report, "Jurisdiction far").severity, Severity::Low);
    }

    #[test]
    fn risky_contract_scores_at_least_nine() {
        let report = review(
            "The term renews through auto-renewal every year.\n\
             The Supplier accepts unlimited liability for all losses.\n",
        );
        let renewal = finding(&report, "Auto-renewal");
        let liability = finding(&report, "Unlimited liability");
        let confidentiality = finding(&report, "Confidentiality missing");

        assert!(renewal.present && liability.present && confidentiality.present);
        assert_eq!(renewal.severity, Severity::Medium);
        assert_eq!(liability.severity, Severity::High);
        assert_eq!(confidentiality.severity, Severity::High);

        let score = report.payload.risk_score();
        assert!(score.score >= 9);
        assert!(matches!(score.rating, Severity::Medium | Severity::High));
        assert!(score.issues_found >= 3);
    }

    #[test]
    fn payload_carries_only_present_risks() {
        let report = review("Confidentiality: all information stays private.\n");
        assert!(report.payload.risks().iter().all(|r| r.present));
        assert!(report
            .payload
            .risks()
            .iter()
            .all(|r| r.name != "Confidentiality missing"));
        assert_eq!(report.findings.len(), crate::risk_detector::RISK_PATTERNS.len());
    }

    #[test]
    fn unreadable_input_aborts_review() {
        let err = service().review_bytes("contract.txt", &[0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, ReviewError::UnreadableInput { .. }));
    }

    #[test]
    fn invalid_webhook_rejected_at_construction() {
        let config = ReviewConfig::default().with_webhook_url("n8n.local/webhook");
        assert!(ReviewService::new(config).is_err());
    }

    #[tokio::test]
    async fn no_webhook_means_no_delivery() {
        let service = service();
        let report = review("Plain text agreement");
        assert!(service.submit(&report.payload).await.is_none());
    }
}
