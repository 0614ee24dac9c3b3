pub mod config;
pub mod dates;
pub mod document_processor;
pub mod error;
pub mod field_extractor;
pub mod inventory;
pub mod models;
pub mod payload;
pub mod research_service;
pub mod review_service;
pub mod risk_detector;
pub mod risk_scorer;
pub mod webhook_service;

pub use config::{ReviewConfig, ScoringConfig};
pub use document_processor::DocumentProcessor;
pub use error::{ReviewError, ReviewResult, TransportError};
pub use models::*;
pub use research_service::ResearchService;
pub use review_service::{ReviewOutcome, ReviewService};
pub use risk_detector::RiskDetector;
pub use webhook_service::WebhookService;
