use serde::{Deserialize, Serialize};

/// Body returned by the greeting service for `/<name>`.
/// Both fields are required; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamResponse {
    pub message: String,
    #[serde(rename = "served-by")]
    pub served_by: String,
}

/// Payload of `GET /`. Field order fixes the key order: `adam`, then `eve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedResult {
    pub adam: String,
    pub eve: String,
}

impl UpstreamResponse {
    /// `"<message> <served-by>"`, one ASCII space between.
    pub fn summary(&self) -> String {
        format!("{} {}", self.message, self.served_by)
    }
}

pub fn combine(adam: &UpstreamResponse, eve: &UpstreamResponse) -> CombinedResult {
    CombinedResult {
        adam: adam.summary(),
        eve: eve.summary(),
    }
}
