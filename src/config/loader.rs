//! Load settings from the environment and the resource catalog from JSON or built-ins.

use crate::config::resolved::{OptionalField, ResolvedModel, ResolvedResource};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

impl GatewayConfig {
    /// Read settings from process environment. Call `dotenvy::dotenv()` first to honour a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };
        let backend_url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let backend_key = required("SUPABASE_KEY")?;

        let mut config = GatewayConfig::new(backend_url, backend_key);
        if let Some(v) = lookup("BACKEND_TIMEOUT_SECS") {
            let secs: u64 = parse_var("BACKEND_TIMEOUT_SECS", &v)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "BACKEND_TIMEOUT_SECS",
                    value: v,
                });
            }
            config.backend_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("BACKEND_RETURN_REPRESENTATION") {
            config.return_representation = parse_var("BACKEND_RETURN_REPRESENTATION", &v)?;
        }
        if let Some(v) = lookup("GATEWAY_HOST") {
            config.host = v;
        }
        if let Some(v) = lookup("GATEWAY_PORT") {
            config.port = parse_var("GATEWAY_PORT", &v)?;
        }
        if let Some(v) = lookup("GATEWAY_BODY_LIMIT_BYTES") {
            config.body_limit_bytes = parse_var("GATEWAY_BODY_LIMIT_BYTES", &v)?;
        }
        config.resources_path = lookup("GATEWAY_RESOURCES_PATH").filter(|v| !v.is_empty());
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// Students, courses and enrollments as stored by the backend.
pub fn builtin_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig {
            path_segment: "estudiantes".into(),
            table: None,
            label: Some("Student".into()),
            id_type: IdType::Int,
            required: vec!["nombre".into(), "email".into()],
            optional: vec![],
        },
        ResourceConfig {
            path_segment: "cursos".into(),
            table: None,
            label: Some("Course".into()),
            id_type: IdType::Int,
            required: vec!["nombre".into()],
            optional: vec![
                OptionalFieldConfig {
                    name: "descripcion".into(),
                    default: Some(json!("")),
                },
                OptionalFieldConfig {
                    name: "creditos".into(),
                    default: Some(json!(3)),
                },
            ],
        },
        ResourceConfig {
            path_segment: "inscripciones".into(),
            table: None,
            label: Some("Enrollment".into()),
            id_type: IdType::Int,
            required: vec!["estudiante_id".into(), "curso_id".into()],
            optional: vec![],
        },
    ]
}

/// Read a catalog file: a JSON array of [`ResourceConfig`].
pub async fn load_resources_from_path(path: impl AsRef<Path>) -> Result<Vec<ResourceConfig>, ConfigError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Catalog named by `config.resources_path`, or the built-ins when unset.
pub async fn load_resources(config: &GatewayConfig) -> Result<Vec<ResourceConfig>, ConfigError> {
    match &config.resources_path {
        Some(path) => load_resources_from_path(path).await,
        None => Ok(builtin_resources()),
    }
}

/// Build resolved model from the catalog (validates first).
pub fn resolve(resources: &[ResourceConfig]) -> Result<ResolvedModel, ConfigError> {
    validate(resources)?;

    let mut out = Vec::with_capacity(resources.len());
    let mut resource_by_path = HashMap::new();
    for r in resources {
        let resolved = ResolvedResource {
            path_segment: r.path_segment.clone(),
            table: r.table.clone().unwrap_or_else(|| r.path_segment.clone()),
            label: r.label.clone().unwrap_or_else(|| r.path_segment.clone()),
            id_type: r.id_type.clone(),
            required: r.required.clone(),
            optional: r
                .optional
                .iter()
                .map(|f| OptionalField {
                    name: f.name.clone(),
                    default: f.default.clone(),
                })
                .collect(),
        };
        resource_by_path.insert(resolved.path_segment.clone(), resolved.clone());
        out.push(resolved);
    }

    Ok(ResolvedModel {
        resources: out,
        resource_by_path,
    })
}
