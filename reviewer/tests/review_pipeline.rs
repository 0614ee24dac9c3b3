use contract_reviewer::*;
use pretty_assertions::assert_eq;

const VENDOR_CONTRACT: &str = "MASTER SERVICES AGREEMENT

This Master Services Agreement is entered into on 15 January 2024 between PT Cahaya Digital (the \"Client\") and Nimbus Cloud Ltd (the \"Vendor\").

1. Scope of Services
Vendor will host and operate the Client's e-commerce platform.

2. Payment Terms
Client shall pay invoices within 45 days. Late payment incurs interest at 2% per month.

3. Term and Renewal
This Agreement is valid until 14 January 2025 and will auto-renew for successive one-year periods.

4. Termination
Vendor may terminate this Agreement at any time by giving 30 days notice.

5. Liability
Client accepts unlimited liability for misuse of the platform.

6. Governing Law
This Agreement is governed by the laws of Singapore and disputes go to the courts of Singapore.
";

fn review(text: &str, config: ReviewConfig) -> ReviewReport {
    let service = ReviewService::new(config).unwrap();
    service.review_bytes("msa.txt", text.as_bytes()).unwrap()
}

fn present_names(report: &ReviewReport) -> Vec<&str> {
    report
        .payload
        .risks()
        .iter()
        .map(|r| r.name.as_str())
        .collect()
}

#[test]
fn vendor_contract_summary() {
    let report = review(VENDOR_CONTRACT, ReviewConfig::default());

    assert_eq!(
        report.payload.summary(),
        &ExtractedSummary {
            title: Some("MASTER SERVICES AGREEMENT".to_string()),
            parties: Some("PT Cahaya Digital; Nimbus Cloud Ltd".to_string()),
            contract_date: Some("2024-01-15".to_string()),
            end_date: Some("2025-01-14".to_string()),
            governing_law: Some("Singapore".to_string()),
        }
    );

    let clauses = report.payload.clauses();
    assert_eq!(
        clauses.services.as_deref(),
        Some("Vendor will host and operate the Client's e-commerce platform.")
    );
    assert_eq!(
        clauses.payment_terms.as_deref(),
        Some("Client shall pay invoices within 45 days. Late payment incurs interest at 2% per month.")
    );
    assert_eq!(
        clauses.termination.as_deref(),
        Some("Vendor may terminate this Agreement at any time by giving 30 days notice.")
    );
}

#[test]
fn vendor_contract_risks() {
    let report = review(VENDOR_CONTRACT, ReviewConfig::default());

    assert_eq!(
        present_names(&report),
        vec![
            "Auto-renewal",
            "Unlimited liability",
            "Unilateral termination",
            "Late payment interest",
            "Jurisdiction far",
            "Confidentiality missing",
            "Data protection missing",
        ]
    );

    let score = report.payload.risk_score();
    assert_eq!(score.score, 15);
    assert_eq!(score.rating, Severity::High);
    assert_eq!(score.issues_found, 7);
}

#[test]
fn local_jurisdiction_softens_foreign_law_finding() {
    let mut config = ReviewConfig::default();
    config.local_jurisdictions = vec!["singapore".to_string()];
    let report = review(VENDOR_CONTRACT, config);

    let jurisdiction = report
        .findings
        .iter()
        .find(|f| f.name == "Jurisdiction far")
        .unwrap();
    assert_eq!(jurisdiction.severity, Severity::Low);
    assert_eq!(report.payload.risk_score().score, 14);
}

#[test]
fn custom_scoring_changes_rating_only_through_config() {
    let mut config = ReviewConfig::default();
    config.scoring.high_threshold = 100;
    let report = review(VENDOR_CONTRACT, config);
    assert_eq!(report.payload.risk_score().score, 15);
    assert_eq!(report.payload.risk_score().rating, Severity::Medium);
}

#[test]
fn protected_contract_has_no_missing_clause_findings() {
    let text = "NON-DISCLOSURE AGREEMENT\n\
                Confidentiality: each party keeps the other's information secret.\n\
                Data Protection: personal data is processed under applicable privacy law.\n";
    let report = review(text, ReviewConfig::default());
    assert!(present_names(&report).is_empty());
    assert_eq!(report.payload.risk_score().rating, Severity::Low);
}

#[test]
fn payload_json_shape() {
    let report = review(VENDOR_CONTRACT, ReviewConfig::default());
    let json = serde_json::to_value(&report.payload).unwrap();

    for key in ["metadata", "summary", "clauses", "risks", "risk_score"] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["metadata"]["filename"], "msa.txt");
    assert_eq!(json["risk_score"]["rating"], "High");
    assert!(json["risks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["present"] == true));
}
