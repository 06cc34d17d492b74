// src/core/resolver.rs — Capital lookup through one constrained completion call
//
// Validating → Calling → Interpreting, single attempt, no retries. Input that
// fails validation never reaches the provider.

use std::sync::Arc;

use super::classifier::{self, Verdict};
use super::system_prompt::{build_system_prompt, INVALID_QUESTION, UNKNOWN_COUNTRY};
use crate::infra::config::ProviderSettings;
use crate::infra::errors::CapitalsError;
use crate::provider::{CompletionRequest, Message, ModelProvider};

pub const EMPTY_INPUT_MESSAGE: &str = "Please provide a country name.";
pub const OFF_TOPIC_MESSAGE: &str =
    "I can only answer questions about capital cities of countries. Please provide a country name.";

/// Sampling parameters for the lookup call.
#[derive(Debug, Clone, Copy)]
pub struct ResolverOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_tokens: 50,
            temperature: 0.1,
        }
    }
}

impl From<&ProviderSettings> for ResolverOptions {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

pub struct CapitalResolver {
    provider: Arc<dyn ModelProvider>,
    options: ResolverOptions,
    system_prompt: String,
}

impl CapitalResolver {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::with_options(provider, ResolverOptions::default())
    }

    pub fn with_options(provider: Arc<dyn ModelProvider>, options: ResolverOptions) -> Self {
        Self {
            provider,
            options,
            system_prompt: build_system_prompt(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve the capital of `country`.
    pub async fn resolve(&self, country: &str) -> Result<String, CapitalsError> {
        let country = validate(country)?;

        let request = CompletionRequest {
            system: Some(self.system_prompt.clone()),
            messages: vec![Message::user(country)],
            max_tokens: Some(self.options.max_tokens),
            temperature: Some(self.options.temperature),
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(reclassify)?;

        tracing::info!(country, reply = %response.content.trim(), "model reply");
        interpret(country, &response.content)
    }
}

/// Trim `country` and run the pre-call checks.
pub fn validate(country: &str) -> Result<&str, CapitalsError> {
    let country = country.trim();
    if country.is_empty() {
        return Err(CapitalsError::Validation(EMPTY_INPUT_MESSAGE.into()));
    }

    let verdict = classifier::classify(country);
    if verdict != Verdict::Accepted {
        tracing::warn!(country, reason = %verdict, "rejected before model call");
        return Err(CapitalsError::Validation(OFF_TOPIC_MESSAGE.into()));
    }

    Ok(country)
}

/// Turn the model's reply into a capital or a typed rejection.
pub fn interpret(country: &str, reply: &str) -> Result<String, CapitalsError> {
    let reply = reply.trim();

    if reply.eq_ignore_ascii_case(INVALID_QUESTION) {
        return Err(CapitalsError::InvalidQuestion);
    }
    if reply.eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
        return Err(CapitalsError::UnknownCountry {
            country: country.into(),
        });
    }

    // Near-miss sentinels ("Unknown country", "invalid input", ...) and empty
    // replies carry no usable capital.
    let lowered = reply.to_lowercase();
    if reply.is_empty() || lowered.contains("unknown") || lowered.contains("invalid") {
        return Err(CapitalsError::UnknownCountry {
            country: country.into(),
        });
    }

    Ok(reply.to_string())
}

/// Promote untyped provider errors whose message names a known failure class.
pub fn reclassify(err: CapitalsError) -> CapitalsError {
    let (provider, message, retriable) = match err {
        CapitalsError::Provider {
            provider,
            message,
            retriable,
        } => (provider, message, retriable),
        other => return other,
    };

    let lowered = message.to_lowercase();
    if lowered.contains("401") || lowered.contains("unauthorized") {
        CapitalsError::ProviderAuth { provider, message }
    } else if lowered.contains("404") {
        CapitalsError::ProviderConfig { provider, message }
    } else if lowered.contains("rate limit") {
        CapitalsError::RateLimited {
            provider,
            retry_after_ms: 0,
        }
    } else {
        CapitalsError::Provider {
            provider,
            message,
            retriable,
        }
    }
}
