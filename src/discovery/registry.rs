use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::record::ServiceRecord;
use crate::error::{AppError, AppResult};

/// A source of service records, read at lookup time.
#[async_trait]
pub trait Registry: Send + Sync {
    async fn records(&self) -> AppResult<Vec<ServiceRecord>>;
}

/// Fixed set of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    records: Vec<ServiceRecord>,
}

impl InMemoryRegistry {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        Self { records }
    }

    /// Loads a JSON array of records. A missing file is an empty registry.
    pub async fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Registry file not found; starting with no records");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::Registry(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let records: Vec<ServiceRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Registry(format!("invalid records in {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), count = records.len(), "Loaded registry file");

        Ok(Self::new(records))
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn records(&self) -> AppResult<Vec<ServiceRecord>> {
        Ok(self.records.clone())
    }
}

/// Registry served over HTTP as a JSON array of records.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    url: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn records(&self) -> AppResult<Vec<ServiceRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Registry(format!("{}: {}", self.url, e)))?;

        response
            .json::<Vec<ServiceRecord>>()
            .await
            .map_err(|e| AppError::Registry(format!("{}: {}", self.url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn missing_file_is_an_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let registry = InMemoryRegistry::from_file(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(registry.records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"project006","location":{{"host":"127.0.0.1","port":8080}}}}]"#
        )
        .unwrap();

        let registry = InMemoryRegistry::from_file(file.path()).await.unwrap();
        let records = registry.records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "project006");
    }

    #[tokio::test]
    async fn malformed_file_is_a_registry_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = InMemoryRegistry::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Registry(_)));
    }

    #[tokio::test]
    async fn http_registry_reads_remote_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "project006", "location": {"host": "10.1.1.1", "port": 8080}},
                {"name": "billing", "location": {"host": "10.1.1.2", "port": 9090}}
            ])))
            .mount(&server)
            .await;

        let registry = HttpRegistry::new(format!("{}/records", server.uri()), reqwest::Client::new());
        let records = registry.records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].location.port, 9090);
    }

    #[tokio::test]
    async fn http_registry_error_status_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let registry = HttpRegistry::new(server.uri(), reqwest::Client::new());
        let err = registry.records().await.unwrap_err();
        assert!(matches!(err, AppError::Registry(_)));
    }
}
