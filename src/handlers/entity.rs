//! Resource CRUD handlers: list, read, create, update, delete.

use crate::config::{IdType, ResolvedResource};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{created, message_ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Path, Request, State},
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str, id_type: &IdType) -> Result<Value, AppError> {
    Ok(match id_type {
        IdType::Uuid => {
            let u = uuid::Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid uuid".into()))?;
            Value::String(u.to_string())
        }
        IdType::Int => {
            let n: i64 = id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))?;
            Value::Number(n.into())
        }
        IdType::Text => Value::String(id_str.to_string()),
    })
}

fn resource<'a>(state: &'a AppState, path_segment: &str) -> Result<&'a ResolvedResource, AppError> {
    state
        .model
        .resource_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(path_segment.to_string()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resource(&state, &path_segment)?;
    let rows = CrudService::list(state.backend.as_ref(), resource).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resource(&state, &path_segment)?;
    let id = parse_id(&id_str, &resource.id_type)?;
    let row = CrudService::read(state.backend.as_ref(), resource, &id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    req: Request,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resource(&state, &path_segment)?;
    let body = JsonBody::from_request(req, &state).await?;
    let row = CrudService::create(state.backend.as_ref(), resource, body.object()).await?;
    tracing::info!(table = %resource.table, "record created");
    Ok(created(format!("{} created successfully", resource.label), row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    req: Request,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resource(&state, &path_segment)?;
    let id = parse_id(&id_str, &resource.id_type)?;
    let body = JsonBody::from_request(req, &state).await?;
    CrudService::update(state.backend.as_ref(), resource, &id, body.object()).await?;
    tracing::info!(table = %resource.table, id = %id_str, "record updated");
    Ok(message_ok(format!("{} updated successfully", resource.label)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resource(&state, &path_segment)?;
    let id = parse_id(&id_str, &resource.id_type)?;
    CrudService::delete(state.backend.as_ref(), resource, &id).await?;
    tracing::info!(table = %resource.table, id = %id_str, "record deleted");
    Ok(message_ok(format!("{} deleted successfully", resource.label)))
}
