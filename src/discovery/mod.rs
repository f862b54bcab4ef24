//! Service discovery: maps a logical service name to a [`ServiceEndpoint`].
//!
//! Records come from a [`Registry`] (a local file or a remote HTTP listing).
//! Lookup happens once at startup; the resolved endpoint is reused for the
//! lifetime of the process.

pub mod record;
pub mod registry;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

pub use record::{RecordLocation, ServiceRecord};
pub use registry::{HttpRegistry, InMemoryRegistry, Registry};

use crate::config::{Config, RegistrySource};
use crate::error::{AppError, AppResult};
use crate::upstream::ServiceEndpoint;

#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve(&self, service_name: &str) -> AppResult<ServiceEndpoint>;
}

/// Resolves names against a registry, picking the first live match.
pub struct RegistryResolver {
    registry: Arc<dyn Registry>,
    call_timeout: Duration,
}

impl RegistryResolver {
    pub fn new(registry: Arc<dyn Registry>, call_timeout: Duration) -> Self {
        Self {
            registry,
            call_timeout,
        }
    }

    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let registry: Arc<dyn Registry> = match &config.registry {
            RegistrySource::Http(url) => {
                let client = reqwest::Client::builder()
                    .timeout(config.upstream_timeout)
                    .build()
                    .map_err(AppError::HttpClient)?;
                Arc::new(HttpRegistry::new(url.clone(), client))
            }
            RegistrySource::File(path) => Arc::new(InMemoryRegistry::from_file(path).await?),
        };

        Ok(Self::new(registry, config.upstream_timeout))
    }
}

#[async_trait]
impl EndpointResolver for RegistryResolver {
    async fn resolve(&self, service_name: &str) -> AppResult<ServiceEndpoint> {
        let records = self.registry.records().await?;
        debug!(service = service_name, candidates = records.len(), "Looking up service");

        let record = records
            .iter()
            .find(|r| r.matches(service_name))
            .ok_or_else(|| AppError::ServiceNotFound {
                name: service_name.to_string(),
            })?;

        let endpoint = ServiceEndpoint::from_location(&record.location, self.call_timeout)?;
        info!(
            service = %record.name,
            registration = %record.registration,
            url = endpoint.base_url(),
            "Resolved service endpoint"
        );

        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::record::RecordStatus;

    fn resolver(records: Vec<ServiceRecord>) -> RegistryResolver {
        RegistryResolver::new(
            Arc::new(InMemoryRegistry::new(records)),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn resolves_first_matching_registration() {
        let resolver = resolver(vec![
            ServiceRecord::http_endpoint("billing", "10.0.0.1", 9000),
            ServiceRecord::http_endpoint("PROJECT006", "10.0.0.2", 8080),
            ServiceRecord::http_endpoint("project006", "10.0.0.3", 8080),
        ]);

        let endpoint = resolver.resolve("project006").await.unwrap();
        assert_eq!(endpoint.base_url(), "http://10.0.0.2:8080");
    }

    #[tokio::test]
    async fn skips_records_that_are_not_up() {
        let resolver = resolver(vec![
            ServiceRecord::http_endpoint("project006", "10.0.0.2", 8080)
                .with_status(RecordStatus::Down),
            ServiceRecord::http_endpoint("project006", "10.0.0.3", 8080),
        ]);

        let endpoint = resolver.resolve("project006").await.unwrap();
        assert_eq!(endpoint.base_url(), "http://10.0.0.3:8080");
    }

    #[tokio::test]
    async fn resolves_ipv6_registration() {
        let resolver = resolver(vec![ServiceRecord::http_endpoint("project006", "::1", 8080)]);

        let endpoint = resolver.resolve("project006").await.unwrap();
        assert_eq!(endpoint.base_url(), "http://[::1]:8080");
    }

    #[tokio::test]
    async fn no_match_is_service_not_found() {
        let resolver = resolver(vec![ServiceRecord::http_endpoint("billing", "h", 1)]);

        match resolver.resolve("project006").await {
            Err(AppError::ServiceNotFound { name }) => assert_eq!(name, "project006"),
            other => panic!("expected ServiceNotFound, got {:?}", other.map(|e| e.base_url().to_string())),
        }
    }

    #[tokio::test]
    async fn registry_failure_propagates() {
        struct Unreachable;

        #[async_trait]
        impl Registry for Unreachable {
            async fn records(&self) -> AppResult<Vec<ServiceRecord>> {
                Err(AppError::Registry("connection refused".into()))
            }
        }

        let resolver = RegistryResolver::new(Arc::new(Unreachable), Duration::from_secs(1));
        assert!(matches!(
            resolver.resolve("project006").await,
            Err(AppError::Registry(_))
        ));
    }
}
