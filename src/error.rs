use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No `UP` http-endpoint record matches the requested name.
    #[error("no registration found for service '{name}'")]
    ServiceNotFound { name: String },

    #[error("service registry unavailable: {0}")]
    Registry(String),

    #[error("record location cannot form a URL: {0}")]
    InvalidEndpoint(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("upstream call to {path} failed: {source}")]
    Upstream {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream body from {path} is malformed: {reason}")]
    MalformedBody { path: String, reason: String },
}

pub type AppResult<T> = Result<T, AppError>;
