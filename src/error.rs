use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{name}' has no readable content")]
    NoContent { name: String },
}

/// Failure of one upload/download round trip.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The endpoint answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to save download: {0}")]
    Save(#[from] std::io::Error),
    #[error("failed to start upload runtime: {0}")]
    Runtime(String),
}

impl ExchangeError {
    /// Text shown to the user; only status failures expose details.
    pub fn user_message(&self) -> String {
        match self {
            ExchangeError::Status(code) => format!("Server error ({})", code),
            _ => "Failed to send file. Please try again or contact the developer.".to_string(),
        }
    }
}
