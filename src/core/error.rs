//! Error types for Black-Scholes reporting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BsResult<T> = Result<T, BsError>;

impl BsError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// True when the market-data provider was unreachable or returned
    /// something we could not use.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Data(_))
    }
}
