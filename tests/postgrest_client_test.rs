// ============================================================================
// PostgrestClient tests against a local fake backend
// ============================================================================
//
// Checks the outbound wire format: path, row filters, credential headers,
// insert preference header, JSON payloads, transport failures and timeouts.
//
// ============================================================================

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::any;
use axum::Router;
use campus_gateway::{AppError, Backend, BackendRequest, GatewayConfig, PostgrestClient};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
struct Captured {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn fake_table(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    log.lock().unwrap().push(Captured {
        method: method.clone(),
        uri,
        headers,
        body,
    });
    match method {
        Method::GET => (StatusCode::OK, r#"[{"id":7}]"#.to_string()),
        Method::POST => (StatusCode::CREATED, r#"[{"id":8,"nombre":"Ana"}]"#.to_string()),
        _ => (StatusCode::NO_CONTENT, String::new()),
    }
}

async fn spawn_fake_backend() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/rest/v1/:table", any(fake_table))
        .with_state(log.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

fn client(base_url: &str) -> PostgrestClient {
    let mut config = GatewayConfig::new(base_url, "service-key");
    config.backend_timeout = Duration::from_secs(5);
    PostgrestClient::new(&config).unwrap()
}

#[tokio::test]
async fn select_sends_credentials_and_row_filter() {
    let (url, log) = spawn_fake_backend().await;
    let response = client(&url)
        .send(BackendRequest::select_by_id("estudiantes", &json!(7)))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"[{"id":7}]"#);

    let captured = log.lock().unwrap()[0].clone();
    assert_eq!(captured.method, Method::GET);
    assert_eq!(captured.uri.path(), "/rest/v1/estudiantes");
    assert_eq!(captured.uri.query(), Some("id=eq.7&select=*"));
    assert_eq!(captured.headers["apikey"], "service-key");
    assert_eq!(captured.headers["authorization"], "Bearer service-key");
    assert_eq!(captured.headers["content-type"], "application/json");
    assert!(captured.headers.get("prefer").is_none());
}

#[tokio::test]
async fn insert_posts_json_and_asks_for_representation() {
    let (url, log) = spawn_fake_backend().await;
    let mut row = Map::new();
    row.insert("nombre".into(), json!("Ana"));
    row.insert("email".into(), json!("ana@x.com"));
    let response = client(&url)
        .send(BackendRequest::insert("estudiantes", row))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    let captured = log.lock().unwrap()[0].clone();
    assert_eq!(captured.method, Method::POST);
    assert_eq!(captured.uri.query(), None);
    assert_eq!(captured.headers["prefer"], "return=representation");
    let sent: Value = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(sent, json!({"nombre": "Ana", "email": "ana@x.com"}));
}

#[tokio::test]
async fn insert_without_representation_omits_prefer() {
    let (url, log) = spawn_fake_backend().await;
    let mut config = GatewayConfig::new(url.as_str(), "service-key");
    config.return_representation = false;
    let client = PostgrestClient::new(&config).unwrap();
    client
        .send(BackendRequest::insert("cursos", Map::new()))
        .await
        .unwrap();

    assert!(log.lock().unwrap()[0].headers.get("prefer").is_none());
}

#[tokio::test]
async fn update_and_delete_filter_by_id() {
    let (url, log) = spawn_fake_backend().await;
    let client = client(&url);
    let mut changes = Map::new();
    changes.insert("creditos".into(), json!(4));

    let updated = client
        .send(BackendRequest::update("cursos", &json!(3), changes))
        .await
        .unwrap();
    let deleted = client
        .send(BackendRequest::delete("cursos", &json!(3)))
        .await
        .unwrap();

    assert_eq!(updated.status, 204);
    assert_eq!(deleted.status, 204);
    let log = log.lock().unwrap();
    assert_eq!(log[0].method, Method::PATCH);
    assert_eq!(log[0].uri.query(), Some("id=eq.3"));
    assert_eq!(
        serde_json::from_slice::<Value>(&log[0].body).unwrap(),
        json!({"creditos": 4})
    );
    assert_eq!(log[1].method, Method::DELETE);
    assert_eq!(log[1].uri.query(), Some("id=eq.3"));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .send(BackendRequest::select("estudiantes", &[], None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn slow_backend_hits_timeout() {
    let app = Router::new().route(
        "/rest/v1/:table",
        any(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, "[]")
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = GatewayConfig::new(format!("http://{}", addr), "service-key");
    config.backend_timeout = Duration::from_secs(1);
    let err = PostgrestClient::new(&config)
        .unwrap()
        .send(BackendRequest::select("estudiantes", &[], None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(ref e) if e.is_timeout()));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
