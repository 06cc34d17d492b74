// src/provider/mod.rs — Model provider layer

pub mod azure;

use async_trait::async_trait;
use serde::Serialize;

use crate::infra::errors::CapitalsError;

/// The one capability the lookup pipeline needs from a model host:
/// turn a system instruction plus messages into text.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, CapitalsError>;
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
}

/// One chat turn, serialized as-is into the provider's `messages` array.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Map a non-success HTTP status from a provider into a typed error.
///
/// 401/403 and 404 mean the deployment itself is wrong and are never retried;
/// 429 is transient; 5xx is retriable; anything else is reported as-is.
pub fn status_error(
    provider: &str,
    status: u16,
    body: &str,
    retry_after_ms: Option<u64>,
) -> CapitalsError {
    match status {
        401 | 403 => CapitalsError::ProviderAuth {
            provider: provider.into(),
            message: format!("HTTP {status}: {body}"),
        },
        404 => CapitalsError::ProviderConfig {
            provider: provider.into(),
            message: format!("HTTP {status}: {body}"),
        },
        429 => CapitalsError::RateLimited {
            provider: provider.into(),
            retry_after_ms: retry_after_ms.unwrap_or(0),
        },
        _ => CapitalsError::Provider {
            provider: provider.into(),
            message: format!("HTTP {status}: {body}"),
            retriable: (500..600).contains(&status),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_system() {
        let m = Message::system("You are a geography assistant");
        assert_eq!(m.role, Role::System);
        assert_eq!(m.content, "You are a geography assistant");
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let m = Message::user("France");
        assert_eq!(m.role, Role::User);
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            serde_json::json!({"role": "user", "content": "France"})
        );
    }

    #[test]
    fn test_status_error_auth() {
        let err = status_error("azure", 401, "Access denied", None);
        assert!(matches!(err, CapitalsError::ProviderAuth { .. }));
        let err = status_error("azure", 403, "Forbidden", None);
        assert!(matches!(err, CapitalsError::ProviderAuth { .. }));
    }

    #[test]
    fn test_status_error_not_found() {
        let err = status_error("azure", 404, "DeploymentNotFound", None);
        assert!(matches!(err, CapitalsError::ProviderConfig { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_status_error_rate_limited() {
        let err = status_error("azure", 429, "", Some(2000));
        assert!(matches!(
            err,
            CapitalsError::RateLimited {
                retry_after_ms: 2000,
                ..
            }
        ));
    }

    #[test]
    fn test_status_error_server_error_is_retriable() {
        assert!(status_error("azure", 503, "busy", None).is_retriable());
        assert!(!status_error("azure", 400, "bad request", None).is_retriable());
    }
}
