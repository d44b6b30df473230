//! Generic CRUD translated onto the backend's row-filter REST convention.

use crate::backend::Backend;
use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::query::BackendRequest;
use crate::service::RequestValidator;
use serde_json::{json, Map, Value};

/// Identifier reported for a created record when the backend's reply has no usable body.
pub const PLACEHOLDER_ID: &str = "nuevo";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;

pub struct CrudService;

impl CrudService {
    /// All rows, decoded and returned verbatim.
    pub async fn list(backend: &dyn Backend, resource: &ResolvedResource) -> Result<Value, AppError> {
        Self::select(backend, BackendRequest::select(&resource.table, &[], None)).await
    }

    /// First `limit` rows. Used by connectivity probes.
    pub async fn probe(
        backend: &dyn Backend,
        resource: &ResolvedResource,
        limit: u32,
    ) -> Result<Vec<Value>, AppError> {
        let rows = Self::select(backend, BackendRequest::select(&resource.table, &[], Some(limit))).await?;
        into_rows(rows)
    }

    /// One row by id. An empty result set is `NotFound`, distinct from backend failure.
    pub async fn read(
        backend: &dyn Backend,
        resource: &ResolvedResource,
        id: &Value,
    ) -> Result<Value, AppError> {
        let rows = Self::select(backend, BackendRequest::select_by_id(&resource.table, id)).await?;
        into_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", resource.label, id_text(id))))
    }

    /// Validate, insert, and return the created record (or a placeholder when the reply body is unusable).
    pub async fn create(
        backend: &dyn Backend,
        resource: &ResolvedResource,
        body: Option<&Map<String, Value>>,
    ) -> Result<Value, AppError> {
        let row = RequestValidator::validate_create(body, resource)?;
        let response = backend.send(BackendRequest::insert(&resource.table, row)).await?;
        if !response.is(STATUS_CREATED) {
            tracing::warn!(table = %resource.table, status = response.status, "insert rejected");
            return Err(response.into_error());
        }
        Ok(created_record(&response.body).unwrap_or_else(|| {
            tracing::warn!(table = %resource.table, "insert accepted without a decodable body; using placeholder id");
            json!({ "id": PLACEHOLDER_ID })
        }))
    }

    /// Partial update of the recognized fields in `body`.
    pub async fn update(
        backend: &dyn Backend,
        resource: &ResolvedResource,
        id: &Value,
        body: Option<&Map<String, Value>>,
    ) -> Result<(), AppError> {
        let changes = RequestValidator::validate_update(body, resource)?;
        let response = backend
            .send(BackendRequest::update(&resource.table, id, changes))
            .await?;
        if !response.is(STATUS_NO_CONTENT) {
            tracing::warn!(table = %resource.table, status = response.status, "update rejected");
            return Err(response.into_error());
        }
        Ok(())
    }

    pub async fn delete(
        backend: &dyn Backend,
        resource: &ResolvedResource,
        id: &Value,
    ) -> Result<(), AppError> {
        let response = backend.send(BackendRequest::delete(&resource.table, id)).await?;
        if !response.is(STATUS_NO_CONTENT) {
            tracing::warn!(table = %resource.table, status = response.status, "delete rejected");
            return Err(response.into_error());
        }
        Ok(())
    }

    async fn select(backend: &dyn Backend, request: BackendRequest) -> Result<Value, AppError> {
        let table = request.table.clone();
        let response = backend.send(request).await?;
        if !response.is(STATUS_OK) {
            tracing::warn!(table = %table, status = response.status, "select rejected");
            return Err(response.into_error());
        }
        response.json()
    }
}

fn into_rows(value: Value) -> Result<Vec<Value>, AppError> {
    match value {
        Value::Array(rows) => Ok(rows),
        other => Err(AppError::Decode(serde::de::Error::custom(format!(
            "expected array of rows, got {}",
            other
        )))),
    }
}

/// The backend echoes inserted rows as an array; a bare object is accepted too.
fn created_record(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Array(rows) => rows.into_iter().next(),
        Value::Null => None,
        record => Some(record),
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
