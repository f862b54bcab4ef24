use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const HTTP_ENDPOINT_TYPE: &str = "http-endpoint";

/// One registration published by a service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    #[serde(default = "Uuid::new_v4")]
    pub registration: Uuid,
    #[serde(rename = "type", default = "default_record_type")]
    pub record_type: String,
    #[serde(default)]
    pub status: RecordStatus,
    pub location: RecordLocation,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[default]
    Up,
    Down,
    OutOfService,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLocation {
    pub host: String,
    pub port: u16,
    /// Path prefix prepended to every request path.
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub ssl: bool,
}

fn default_record_type() -> String {
    HTTP_ENDPOINT_TYPE.to_string()
}

impl ServiceRecord {
    /// Case-insensitive exact name match against a live HTTP endpoint.
    pub fn matches(&self, name: &str) -> bool {
        self.status == RecordStatus::Up
            && self.record_type == HTTP_ENDPOINT_TYPE
            && self.name.eq_ignore_ascii_case(name)
    }
}

impl RecordLocation {
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        // IPv6 literals need brackets in the authority.
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let root = self.root.trim_end_matches('/');
        if root.is_empty() || root.starts_with('/') {
            format!("{}://{}:{}{}", scheme, host, self.port, root)
        } else {
            format!("{}://{}:{}/{}", scheme, host, self.port, root)
        }
    }
}

#[cfg(test)]
impl ServiceRecord {
    pub fn http_endpoint(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            registration: Uuid::new_v4(),
            record_type: default_record_type(),
            status: RecordStatus::Up,
            location: RecordLocation {
                host: host.into(),
                port,
                root: String::new(),
                ssl: false,
            },
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }
}
