#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use campus_gateway::{
    app, builtin_resources, resolve, AppError, AppState, Backend, BackendRequest, BackendResponse,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Backend double: replies from a script and records every request it receives.
#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<BackendResponse>>,
    calls: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    pub fn replying(replies: Vec<BackendResponse>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<BackendRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, AppError> {
        self.calls.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Internal("connection reset by peer".into()))
    }
}

pub fn router(backend: Arc<dyn Backend>) -> Router {
    router_with_limit(backend, 1024 * 1024)
}

pub fn router_with_limit(backend: Arc<dyn Backend>, body_limit_bytes: usize) -> Router {
    let model = resolve(&builtin_resources()).unwrap();
    app(AppState::new(backend, model), body_limit_bytes)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn call(router: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse { status, body }
}
