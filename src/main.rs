use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod config;
mod discovery;
mod error;
mod handlers;
mod models;
mod upstream;

use crate::config::Config;
use crate::discovery::{EndpointResolver, RegistryResolver};
use crate::upstream::ServiceEndpoint;

/// Shared application state. The endpoint is resolved once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub endpoint: Arc<ServiceEndpoint>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hello_consumer=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    info!(
        service = %config.upstream_service,
        registry = ?config.registry,
        "Starting hello-consumer"
    );

    let resolver = match RegistryResolver::from_config(&config).await {
        Ok(resolver) => resolver,
        Err(e) => {
            error!(error = %e, "Service discovery failure; HTTP server not started");
            return Err(e.into());
        }
    };

    let (listener, app) = start(&config, &resolver).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolves the upstream exactly once, then binds. Nothing listens if the
/// lookup fails; there is no retry.
async fn start(
    config: &Config,
    resolver: &dyn EndpointResolver,
) -> anyhow::Result<(TcpListener, Router)> {
    let endpoint = match resolver.resolve(&config.upstream_service).await {
        Ok(endpoint) => endpoint,
        Err(e) => {
            error!(
                service = %config.upstream_service,
                error = %e,
                "Service discovery failure; HTTP server not started"
            );
            return Err(e.into());
        }
    };

    let state = AppState {
        endpoint: Arc::new(endpoint),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    Ok((listener, build_router(state)))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::greeting::greet))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
