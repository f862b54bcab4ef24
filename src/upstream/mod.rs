pub mod endpoint;
pub mod fanout;

use async_trait::async_trait;

pub use endpoint::ServiceEndpoint;
pub use fanout::fetch_pair;

use crate::error::AppResult;

/// Something that answers GET requests with a JSON body.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get_json(&self, path: &str) -> AppResult<serde_json::Value>;
}
