use contract_reviewer::*;
use std::fmt::Write;

const MISSING: &str = "-";

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

pub fn review_report(report: &ReviewReport) -> String {
    let payload = &report.payload;
    let summary = payload.summary();
    let clauses = payload.clauses();
    let score = payload.risk_score();
    let mut out = String::new();

    let _ = writeln!(out, "Contract review: {}", payload.metadata().filename);
    let _ = writeln!(out, "Review id:       {}", payload.metadata().review_id);
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  Title:          {}", field(&summary.title));
    let _ = writeln!(out, "  Parties:        {}", field(&summary.parties));
    let _ = writeln!(out, "  Contract date:  {}", field(&summary.contract_date));
    let _ = writeln!(out, "  End date:       {}", field(&summary.end_date));
    let _ = writeln!(out, "  Governing law:  {}", field(&summary.governing_law));
    let _ = writeln!(out);
    let _ = writeln!(out, "Clauses");
    let _ = writeln!(out, "  Services:       {}", field(&clauses.services));
    let _ = writeln!(out, "  Payment terms:  {}", field(&clauses.payment_terms));
    let _ = writeln!(out, "  Termination:    {}", field(&clauses.termination));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Risk rating: {} (score {}, {} issue(s) found)",
        score.rating, score.score, score.issues_found
    );

    for finding in report.findings.iter().filter(|f| f.present) {
        let _ = writeln!(out, "  [{}] {}", finding.severity, finding.name);
        if let Some(details) = &finding.details {
            let _ = writeln!(out, "      {}", details);
        }
    }
    if score.issues_found == 0 {
        let _ = writeln!(out, "  No risk patterns matched.");
    }

    let _ = write!(out, "\nProcessed in {} ms", report.processing_time_ms);
    out
}

pub fn webhook_response(response: &WebhookResponse) -> String {
    match &response.body {
        ResponseBody::Json(value) => format!(
            "Webhook answered HTTP {}:\n{}",
            response.status,
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
        ResponseBody::Text(text) if text.trim().is_empty() => {
            format!("Webhook answered HTTP {} with an empty body", response.status)
        }
        ResponseBody::Text(text) => format!("Webhook answered HTTP {}:\n{}", response.status, text),
    }
}

/// Item-lookup replies, with the workflow's well-known keys called out.
pub fn item_lookup(response: &WebhookResponse) -> String {
    let mut out = webhook_response(response);
    if let ResponseBody::Json(value) = &response.body {
        if let Some(message) = value.get("pesan").and_then(|v| v.as_str()) {
            let _ = write!(out, "\n\nMessage: {}", message);
        }
        if let Some(item) = value.get("barang_yang_diminta").and_then(|v| v.as_str()) {
            let _ = write!(out, "\nItem processed: {}", item);
        }
    }
    out
}

pub fn research(outcome: &ResearchOutcome) -> String {
    match outcome {
        ResearchOutcome::Text(text) => text.clone(),
        ResearchOutcome::Raw(value) => format!(
            "Could not find the message text in the flow response; raw response follows:\n{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
    }
}

pub fn stock_table(sku: &str, rows: &[StockStatus]) -> String {
    if rows.is_empty() {
        return format!("No stock found for {}", sku.trim());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<20} {:<8} {:<14} {:>5} {:<5} {:<10} {}",
        "SKU", "Product", "Variant", "Location", "Qty", "UOM", "Low stock", "ETA restock"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<16} {:<20} {:<8} {:<14} {:>5} {:<5} {:<10} {}",
            row.sku,
            row.product_name,
            row.variant,
            row.location,
            row.qty,
            row.uom,
            if row.low_stock { "yes" } else { "no" },
            row.eta_restock.as_deref().unwrap_or(MISSING)
        );
    }
    out.trim_end().to_string()
}
