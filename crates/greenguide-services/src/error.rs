//! Errors shared by every external lookup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{status} Unauthorized: {body}")]
    Unauthorized { status: u16, body: String },

    #[error("{status} error: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ServiceError {
    /// What the user can do about it, when there is something to do.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Network(_) => Some("Check your internet connection."),
            Self::Unauthorized { .. } => {
                Some("The service rejected the API key. Check your .env settings.")
            }
            Self::Status { status, .. } if *status >= 500 => {
                Some("The service is having trouble. Please try again later.")
            }
            Self::Status { .. } | Self::Parse(_) | Self::Client(_) => None,
        }
    }
}
