// src/api/mod.rs — HTTP API for capital lookups

pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::core::CapitalService;
use crate::infra::config::ServerConfig;

pub const SERVICE_NAME: &str = "Capitals API";

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub service: CapitalService,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/capital/{country}", get(handlers::get_capital))
        .route("/clear-cache", post(handlers::clear_cache))
        .route("/health", get(handlers::health))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state, &config.cors_origins);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CapitalResolver, LookupCache};
    use crate::infra::errors::CapitalsError;
    use crate::provider::{CompletionRequest, CompletionResponse, ModelProvider};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct EchoProvider;

    #[async_trait]
    impl ModelProvider for EchoProvider {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, CapitalsError> {
            let country = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                content: format!("{country} City"),
                ..Default::default()
            })
        }
    }

    fn test_state() -> ApiState {
        let resolver = CapitalResolver::new(Arc::new(EchoProvider));
        ApiState {
            service: CapitalService::new(resolver, LookupCache::new(8)),
        }
    }

    fn app() -> Router {
        build_router(test_state(), &["http://localhost:3000".to_string()])
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_home_lists_endpoints() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["endpoints"]["capital"], "/capital/{country}");
    }

    #[tokio::test]
    async fn test_capital_endpoint() {
        let req = Request::builder()
            .uri("/capital/Kenya")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["country"], "Kenya");
        assert_eq!(body["capital"], "Kenya City");
        assert_eq!(body["source"], "Echo");
    }

    #[tokio::test]
    async fn test_capital_endpoint_decodes_path() {
        let req = Request::builder()
            .uri("/capital/South%20Africa")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let body = json_body(resp).await;
        assert_eq!(body["country"], "South Africa");
    }

    #[tokio::test]
    async fn test_rejected_input_is_404_with_detail() {
        let req = Request::builder()
            .uri("/capital/hello")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("I can only answer questions about capital cities"));
    }

    #[tokio::test]
    async fn test_clear_cache_endpoint() {
        let req = Request::builder()
            .method("POST")
            .uri("/clear-cache")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["message"], "Cache cleared");
    }

    #[tokio::test]
    async fn test_clear_cache_rejects_get() {
        let req = Request::builder()
            .uri("/clear-cache")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let req = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }
}
