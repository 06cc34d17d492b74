// src/infra/errors.rs — Error types for the capitals service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapitalsError {
    // User errors (not found class)
    #[error("{0}")]
    Validation(String),

    #[error(
        "I can only answer questions about capital cities of countries. Please ask about a country's capital."
    )]
    InvalidQuestion,

    #[error("'{country}' is not a recognized country. Please provide a valid country name.")]
    UnknownCountry { country: String },

    // Provider errors (deployment misconfiguration, fatal)
    #[error("Provider '{provider}' authentication failed: {message}")]
    ProviderAuth { provider: String, message: String },

    #[error("Provider '{provider}' deployment not found: {message}")]
    ProviderConfig { provider: String, message: String },

    // Provider errors (transient)
    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapitalsError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            CapitalsError::Provider {
                retriable: true,
                ..
            } | CapitalsError::RateLimited { .. }
        )
    }

    /// Failures the caller can fix by changing the input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CapitalsError::Validation(_)
                | CapitalsError::InvalidQuestion
                | CapitalsError::UnknownCountry { .. }
        )
    }

    /// Failures that need an operator, not a retry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CapitalsError::ProviderAuth { .. }
                | CapitalsError::ProviderConfig { .. }
                | CapitalsError::Config(_)
        )
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CapitalsError::Validation(_) => "validation",
            CapitalsError::InvalidQuestion => "invalid_question",
            CapitalsError::UnknownCountry { .. } => "unknown_country",
            CapitalsError::ProviderAuth { .. } => "provider_auth",
            CapitalsError::ProviderConfig { .. } => "provider_config",
            CapitalsError::RateLimited { .. } => "rate_limited",
            CapitalsError::Provider { .. } => "provider",
            CapitalsError::Config(_) => "config",
            CapitalsError::Other(_) => "internal",
        }
    }
}
