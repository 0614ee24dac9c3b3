use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub content: String,
}

/// Headline fields pulled out of a contract. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSummary {
    pub title: Option<String>,
    pub parties: Option<String>,
    pub contract_date: Option<String>,
    pub end_date: Option<String>,
    pub governing_law: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseExcerpts {
    pub services: Option<String>,
    pub payment_terms: Option<String>,
    pub termination: Option<String>,
    pub governing_law: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub name: String,
    pub present: bool,
    pub details: Option<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: u32,
    pub rating: Severity,
    pub issues_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    pub review_id: String,
    pub filename: String,
    pub generated_at: String,
    pub character_count: usize,
    pub source: String,
}

/// Outbound review body. Built once by `ReviewPayload::assemble`
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub(crate) metadata: ReviewMetadata,
    pub(crate) summary: ExtractedSummary,
    pub(crate) clauses: ClauseExcerpts,
    pub(crate) risks: Vec<RiskFinding>,
    pub(crate) risk_score: RiskScore,
}

impl ReviewPayload {
    pub fn metadata(&self) -> &ReviewMetadata {
        &self.metadata
    }

    pub fn summary(&self) -> &ExtractedSummary {
        &self.summary
    }

    pub fn clauses(&self) -> &ClauseExcerpts {
        &self.clauses
    }

    pub fn risks(&self) -> &[RiskFinding] {
        &self.risks
    }

    pub fn risk_score(&self) -> RiskScore {
        self.risk_score
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    pub payload: ReviewPayload,
    pub findings: Vec<RiskFinding>,
    pub processing_time_ms: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "disetujui")]
    Approved,
    #[serde(rename = "ditolak")]
    Rejected,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approved => f.write_str("approved"),
            Decision::Rejected => f.write_str("rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPayload {
    pub decision: Decision,
    pub contract_name: String,
    pub review_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLookupRequest {
    pub barang: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    pub tweaks: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResearchOutcome {
    Text(String),
    /// The flow answered, but not in the usual chat shape.
    Raw(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Variant")]
    pub variant: String,
    #[serde(rename = "UOM")]
    pub uom: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "Low Stock Threshold", default)]
    pub low_stock_threshold: u32,
    #[serde(rename = "ETA Restock", default)]
    pub eta_restock: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    #[serde(rename = "SKU")]
    pub sku: String,
    pub product_name: String,
    pub variant: String,
    pub uom: String,
    pub location: String,
    pub qty: u32,
    pub low_stock: bool,
    pub eta_restock: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}
