// src/provider/azure.rs — Azure OpenAI chat completions provider
//
// Deployment-scoped endpoint:
//   {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={v}
// Authenticated with the `api-key` header.

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use super::{
    status_error, CompletionRequest, CompletionResponse, Message, ModelProvider, TokenUsage,
};
use crate::infra::config::{AzureCredentials, ProviderSettings};
use crate::infra::errors::CapitalsError;

const PROVIDER_ID: &str = "azure";

pub struct AzureOpenAIProvider {
    api_key: String,
    client: reqwest::Client,
    endpoint: String,
    deployment: String,
    api_version: String,
}

impl AzureOpenAIProvider {
    pub fn new(
        credentials: &AzureCredentials,
        settings: &ProviderSettings,
    ) -> Result<Self, CapitalsError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("capitals/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            CapitalsError::Config(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key: credentials.api_key.clone(),
            client,
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            deployment: credentials.deployment.clone(),
            api_version: settings.api_version.clone(),
        })
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

/// Build the JSON body. Azure infers the model from the deployment in the URL.
fn build_body(request: &CompletionRequest) -> serde_json::Value {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(system) = &request.system {
        messages.push(Message::system(system.as_str()));
    }
    messages.extend(request.messages.iter().cloned());

    let mut body = serde_json::json!({ "messages": messages });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

/// Extract the first choice's text. A reply without string content (content
/// filter, empty `choices`, or a non-completion body) is a provider fault.
fn parse_completion(resp: &serde_json::Value) -> Result<CompletionResponse, CapitalsError> {
    let choice = &resp["choices"][0];
    let Some(content) = choice["message"]["content"].as_str() else {
        let finish_reason = choice["finish_reason"].as_str().unwrap_or("none");
        return Err(CapitalsError::Provider {
            provider: PROVIDER_ID.into(),
            message: format!("empty completion (finish_reason={finish_reason})"),
            retriable: false,
        });
    };

    let usage = TokenUsage {
        input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    };

    Ok(CompletionResponse {
        content: content.to_string(),
        usage,
    })
}

/// Azure sends `retry-after-ms`; plain `retry-after` (seconds) is the fallback.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };
    header("retry-after-ms")
        .or_else(|| header("retry-after").map(|secs| secs.saturating_mul(1000)))
}

#[async_trait]
impl ModelProvider for AzureOpenAIProvider {
    fn name(&self) -> &str {
        "Azure OpenAI"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CapitalsError> {
        let body = build_body(&request);

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CapitalsError::Provider {
                provider: PROVIDER_ID.into(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after_ms(response.headers());
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(
                PROVIDER_ID,
                status.as_u16(),
                &error_body,
                retry_after,
            ));
        }

        let resp: serde_json::Value =
            response.json().await.map_err(|e| CapitalsError::Provider {
                provider: PROVIDER_ID.into(),
                message: format!("Failed to parse response: {e}"),
                retriable: false,
            })?;

        let completion = parse_completion(&resp)?;
        tracing::debug!(
            deployment = %self.deployment,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "completion received"
        );
        Ok(completion)
    }
}
