//! Error types for provider calls

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Non-success status or an error payload from the provider
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Well-formed HTTP answer without usable content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Error::ProviderError(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Error::InvalidResponse(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
