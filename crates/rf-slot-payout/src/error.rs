//! Error types for the payout engine

use thiserror::Error;

/// Payout engine error type
#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("A spin is already being evaluated on this machine")]
    ConcurrentSpin,

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid bet: {0}")]
    InvalidBet(f64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayoutError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result type alias
pub type PayoutResult<T> = Result<T, PayoutError>;
