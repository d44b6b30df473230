//! Request validation against a resource's field sets.

use crate::config::ResolvedResource;
use crate::error::AppError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Insert payload: every required field present and non-null, unknown fields dropped,
    /// absent optional fields filled from their defaults.
    pub fn validate_create(
        body: Option<&Map<String, Value>>,
        resource: &ResolvedResource,
    ) -> Result<Map<String, Value>, AppError> {
        let empty = Map::new();
        let body = body.unwrap_or(&empty);

        let missing: Vec<&str> = resource
            .required
            .iter()
            .filter(|f| body.get(f.as_str()).map_or(true, Value::is_null))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let mut row = Map::new();
        for f in &resource.required {
            if let Some(v) = body.get(f) {
                row.insert(f.clone(), v.clone());
            }
        }
        for f in &resource.optional {
            match body.get(&f.name) {
                Some(v) => {
                    row.insert(f.name.clone(), v.clone());
                }
                None => {
                    if let Some(default) = &f.default {
                        row.insert(f.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(row)
    }

    /// Partial update payload: only known fields, present and non-null. Empty is rejected.
    pub fn validate_update(
        body: Option<&Map<String, Value>>,
        resource: &ResolvedResource,
    ) -> Result<Map<String, Value>, AppError> {
        let changes: Map<String, Value> = body
            .into_iter()
            .flatten()
            .filter(|(k, v)| resource.is_known_field(k) && !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if changes.is_empty() {
            return Err(AppError::Validation("no valid fields to update".into()));
        }
        Ok(changes)
    }
}
