// src/core/service.rs — Lookup entry point shared by the HTTP handlers
//
// Built once at startup and cloned into handler state. Each lookup runs on its
// own tokio task, so a client hanging up mid-request does not abort a model
// call whose answer is about to be cached.

use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

use super::cache::{CacheStats, LookupCache};
use super::resolver::CapitalResolver;
use crate::infra::errors::CapitalsError;

/// Successful lookup, as returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalAnswer {
    pub country: String,
    pub capital: String,
    pub source: String,
}

#[derive(Clone)]
pub struct CapitalService {
    cache: Arc<LookupCache>,
    resolver: Arc<CapitalResolver>,
}

impl CapitalService {
    pub fn new(resolver: CapitalResolver, cache: LookupCache) -> Self {
        Self {
            cache: Arc::new(cache),
            resolver: Arc::new(resolver),
        }
    }

    /// Name of the model host answering lookups.
    pub fn source(&self) -> &str {
        self.resolver.provider_name()
    }

    /// Cache first, then the resolver. `country` is echoed back as given.
    pub async fn lookup(&self, country: &str) -> Result<CapitalAnswer, CapitalsError> {
        let cache = Arc::clone(&self.cache);
        let resolver = Arc::clone(&self.resolver);
        let key = country.to_string();

        // The caller's span (request id) follows the work onto the new task.
        let task = tokio::spawn(
            async move {
                cache
                    .get_or_compute(&key, || resolver.resolve(&key))
                    .await
            }
            .in_current_span(),
        );

        let result = task
            .await
            .map_err(|e| CapitalsError::Other(anyhow::anyhow!("lookup task failed: {e}")))?;

        match result {
            Ok(capital) => {
                tracing::info!(country, capital = %capital, "capital found");
                Ok(CapitalAnswer {
                    country: country.to_string(),
                    capital,
                    source: self.source().to_string(),
                })
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!(country, kind = e.kind(), "lookup rejected: {e}");
                } else {
                    tracing::error!(
                        country,
                        kind = e.kind(),
                        retriable = e.is_retriable(),
                        fatal = e.is_fatal(),
                        "lookup failed: {e}"
                    );
                }
                Err(e)
            }
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::info!("lookup cache cleared");
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
