//! Common routes: root, health, backend connectivity probe, version.

use crate::error::AppError;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

const HEALTH_PROBE_LIMIT: u32 = 1;
const TEST_DB_SAMPLE_LIMIT: u32 = 5;

#[derive(Serialize)]
struct RootBody {
    message: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct TestDbBody {
    message: &'static str,
    table: String,
    count: usize,
    data: Vec<Value>,
}

async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: "Students and courses API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Always 200; `status` reports whether the backend answered a one-row list query.
async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let probe = match state.model.probe_resource() {
        Some(resource) => CrudService::probe(state.backend.as_ref(), resource, HEALTH_PROBE_LIMIT)
            .await
            .map(|_| ()),
        None => Err(AppError::NotFound("no resources configured".into())),
    };
    match probe {
        Ok(()) => Json(HealthBody {
            status: "healthy",
            database: "connected",
            tables: Some(state.model.tables().into_iter().map(String::from).collect()),
            error: None,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            let error = match e {
                AppError::Backend { message, .. } => message,
                other => other.to_string(),
            };
            Json(HealthBody {
                status: "error",
                database: "connection failed",
                tables: None,
                error: Some(error),
            })
        }
    }
}

async fn test_db(State(state): State<AppState>) -> Result<Json<TestDbBody>, AppError> {
    let resource = state
        .model
        .probe_resource()
        .ok_or_else(|| AppError::NotFound("no resources configured".into()))?;
    let data = CrudService::probe(state.backend.as_ref(), resource, TEST_DB_SAMPLE_LIMIT)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "backend connectivity test failed");
            AppError::Internal(format!("backend query failed: {}", e))
        })?;
    Ok(Json(TestDbBody {
        message: "Backend connection successful",
        table: resource.table.clone(),
        count: data.len(),
        data,
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, /health, /test-db, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test-db", get(test_db))
        .route("/version", get(version))
        .with_state(state)
}
