use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("could not read {filename}: {reason}")]
    UnreadableInput { filename: String, reason: String },

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type ReviewResult<T> = std::result::Result<T, ReviewError>;
