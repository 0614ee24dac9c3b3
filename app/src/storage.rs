use anyhow::{Context, Result};
use contract_reviewer::ReviewPayload;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when a payload has to be kept for a manual retry.
pub fn default_payload_path(payload: &ReviewPayload) -> PathBuf {
    PathBuf::from(format!("review-{}.json", payload.metadata().review_id))
}

pub fn save_payload(path: &Path, payload: &ReviewPayload) -> Result<()> {
    let json = serde_json::to_string_pretty(payload).context("Failed to serialize review payload")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved review payload to {}", path.display());
    Ok(())
}

/// Read back a payload written by [`save_payload`].
pub fn load_payload(path: &Path) -> Result<ReviewPayload> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read review payload {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("{} is not a saved review payload", path.display()))
}
