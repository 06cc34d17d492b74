// src/cli/serve.rs — Default command: build the lookup service and serve HTTP

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::core::resolver::ResolverOptions;
use crate::core::{CapitalResolver, CapitalService, LookupCache};
use crate::infra::config::{AzureCredentials, Config};
use crate::provider::azure::AzureOpenAIProvider;

/// Wire provider, resolver, and cache from config plus environment.
///
/// Fails when any required Azure variable is missing.
pub fn build_service(config: &Config) -> anyhow::Result<CapitalService> {
    let credentials = AzureCredentials::from_env()?;

    let mut settings = config.provider.clone();
    settings.apply_env(|name| std::env::var(name).ok())?;

    let provider = AzureOpenAIProvider::new(&credentials, &settings)?;
    tracing::info!(
        endpoint = %credentials.endpoint,
        deployment = %provider.deployment(),
        api_version = %settings.api_version,
        timeout_secs = ?settings.timeout_secs,
        "Azure OpenAI provider ready"
    );

    let resolver =
        CapitalResolver::with_options(Arc::new(provider), ResolverOptions::from(&settings));
    let cache = LookupCache::new(config.cache.capacity);
    tracing::debug!(capacity = cache.capacity(), "lookup cache created");

    Ok(CapitalService::new(resolver, cache))
}

pub async fn run_serve(config: &Config) -> anyhow::Result<()> {
    let service = build_service(config)?;
    api::start_server(&config.server, ApiState { service }).await
}
