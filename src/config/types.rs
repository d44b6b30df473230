//! Raw config types: process settings and the resource catalog JSON schema.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Base URL of the backend, without the `/rest/v1` suffix.
    pub backend_url: String,
    /// Service key sent as `apikey` and as the bearer token.
    pub backend_key: String,
    /// Upper bound on each outbound call.
    pub backend_timeout: Duration,
    /// Ask the backend to echo inserted rows (`Prefer: return=representation`).
    pub return_representation: bool,
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub resources_path: Option<String>,
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

impl GatewayConfig {
    /// Settings with defaults for everything except the backend credentials.
    pub fn new(backend_url: impl Into<String>, backend_key: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            backend_key: backend_key.into(),
            backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            return_representation: true,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            resources_path: None,
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How path ids are parsed before being placed in a row filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    #[default]
    Int,
    Uuid,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionalFieldConfig {
    pub name: String,
    /// Filled in on create when the body omits the field.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

/// One entry of the resource catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub path_segment: String,
    /// Backend table; defaults to the path segment.
    #[serde(default)]
    pub table: Option<String>,
    /// Singular display name used in response messages.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub id_type: IdType,
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<OptionalFieldConfig>,
}
