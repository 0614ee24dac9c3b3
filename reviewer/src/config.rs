use crate::error::{ReviewError, ReviewResult};
use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 600;
pub const DEFAULT_LOCAL_JURISDICTION: &str = "indonesia";

/// Severity weights and rating cut-offs. These are tuning values, not law.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub low_weight: u32,
    pub medium_weight: u32,
    pub high_weight: u32,
    /// Lowest score rated Medium.
    pub medium_threshold: u32,
    /// Lowest score rated High.
    pub high_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            low_weight: 1,
            medium_weight: 2,
            high_weight: 3,
            medium_threshold: 6,
            high_threshold: 12,
        }
    }
}

/// Per-session settings. Held in memory only and handed to each operation.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub webhook_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub local_jurisdictions: Vec<String>,
    pub max_excerpt_chars: usize,
    pub scoring: ScoringConfig,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            local_jurisdictions: vec![DEFAULT_LOCAL_JURISDICTION.to_string()],
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
            scoring: ScoringConfig::default(),
        }
    }
}

impl ReviewConfig {
    /// Settings from the environment (and `.env`). Not validated here:
    /// callers apply their overrides first, then call [`ReviewConfig::validate`].
    pub fn from_env() -> ReviewResult<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        config.webhook_url = non_empty_var("REVIEW_WEBHOOK_URL");
        config.api_key = non_empty_var("REVIEW_API_KEY");

        if let Some(raw) = non_empty_var("REVIEW_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                ReviewError::InvalidConfig(format!("REVIEW_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = non_empty_var("REVIEW_LOCAL_JURISDICTIONS") {
            config.local_jurisdictions = parse_list(&raw);
        }

        Ok(config)
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> ReviewResult<()> {
        if let Some(url) = &self.webhook_url {
            validate_url(url)?;
        }
        if self.request_timeout.is_zero() {
            return Err(ReviewError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.scoring.medium_threshold > self.scoring.high_threshold {
            return Err(ReviewError::InvalidConfig(format!(
                "medium threshold {} is above high threshold {}",
                self.scoring.medium_threshold, self.scoring.high_threshold
            )));
        }
        Ok(())
    }
}

pub fn validate_url(url: &str) -> ReviewResult<()> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(ReviewError::InvalidConfig(format!(
            "endpoint must be an http(s) URL, got '{}'",
            url
        )))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = ReviewConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.local_jurisdictions, vec!["indonesia".to_string()]);
        assert_eq!(config.scoring.medium_threshold, 6);
        assert_eq!(config.scoring.high_threshold, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_webhook() {
        let config = ReviewConfig::default().with_webhook_url("ftp://example.org/hook");
        assert!(matches!(config.validate(), Err(ReviewError::InvalidConfig(_))));

        let config =
            ReviewConfig::default().with_webhook_url("https://n8n.example.org/webhook/abc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = ReviewConfig::default();
        config.scoring.medium_threshold = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_list_lowercases_and_skips_blanks() {
        assert_eq!(
            parse_list("Indonesia, ,Jakarta "),
            vec!["indonesia".to_string(), "jakarta".to_string()]
        );
    }
}
