//! Outbound HTTP client for the PostgREST backend. The only place that performs I/O.

use crate::config::GatewayConfig;
use crate::error::{AppError, ConfigError};
use crate::query::BackendRequest;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

/// Raw backend reply: status code and body text, uninterpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        BackendResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is(&self, status: u16) -> bool {
        self.status == status
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The response as a backend error, status and body unchanged.
    pub fn into_error(self) -> AppError {
        AppError::Backend {
            status: self.status,
            message: self.body,
        }
    }
}

/// Executes one backend request. Any status is a successful send; only transport failures are errors.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, AppError>;
}

pub struct PostgrestClient {
    client: reqwest::Client,
    base_url: String,
    return_representation: bool,
}

impl PostgrestClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let key = header_value(&config.backend_key)?;
        let bearer = header_value(&format!("Bearer {}", config.backend_key))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.backend_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            return_representation: config.return_representation,
        })
    }

    fn url(&self, request: &BackendRequest) -> Result<Url, AppError> {
        let raw = format!("{}{}", self.base_url, request.path());
        let parsed = if request.params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, &request.params)
        };
        parsed.map_err(|_| {
            AppError::Config(ConfigError::InvalidValue {
                name: "SUPABASE_URL",
                value: self.base_url.clone(),
            })
        })
    }
}

fn header_value(s: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(s).map_err(|_| {
        AppError::Config(ConfigError::InvalidValue {
            name: "SUPABASE_KEY",
            value: "<redacted>".into(),
        })
    })
}

#[async_trait]
impl Backend for PostgrestClient {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, AppError> {
        let url = self.url(&request)?;
        tracing::debug!(method = %request.method, table = %request.table, query = ?url.query(), "backend request");

        let mut builder = self.client.request(request.method.clone(), url);
        if request.method == Method::POST && self.return_representation {
            builder = builder.header("Prefer", "return=representation");
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(table = %request.table, error = %e, "backend request failed");
            AppError::Transport(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, table = %request.table, "backend response");
        Ok(BackendResponse { status, body })
    }
}
