//! Error taxonomy shared by the entry store, the sync orchestrator and the gateways.

use thiserror::Error;

pub type QuoteResult<T> = std::result::Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Rejected `add`: text or category empty after trimming.
    #[error("invalid quote: {0}")]
    Validation(String),

    /// Rejected import payload.
    #[error("invalid import: {0}")]
    Format(String),

    /// Remote fetch/push failure. `status` carries the HTTP status when one was received.
    #[error("remote request failed{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl QuoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        QuoteError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        QuoteError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, QuoteError::Transport { .. })
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}
