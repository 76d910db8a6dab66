use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use finboard_client::{
    run_probe, ApiClient, ClientError, FailureKind, ListQuery, ProbeExpectations, TransactionSource,
    TransactionType,
};
use serde_json::{json, Value};
use std::collections::HashMap;

fn seed() -> Vec<Value> {
    (1..=25)
        .map(|id| {
            let description = if id == 1 { "Groceries".to_string() } else { format!("Entry {}", id) };
            json!({
                "id": id,
                "description": description,
                "amount": 10.5 * id as f64,
                "type": if id % 3 == 0 { "credit" } else { "debit" },
                "category_id": 1,
                "category_rel": {"id": 1, "name": "Food"},
                "date": "2024-01-15T10:30:00",
                "user_id": 1
            })
        })
        .collect()
}

async fn list(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let skip = params.get("skip").and_then(|s| s.parse().ok()).unwrap_or(0);
    let limit = params.get("limit").and_then(|s| s.parse().ok()).unwrap_or(100);
    let items: Vec<Value> = seed().into_iter().skip(skip).take(limit).collect();
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(items))
}

async fn detail(Path(id): Path<i64>) -> axum::response::Response {
    match seed().into_iter().find(|t| t["id"] == json!(id)) {
        Some(tx) => ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(tx)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

fn backend() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/transactions", get(list))
        .route("/api/v1/transactions/", get(list))
        .route("/api/v1/transactions/:id", get(detail))
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_list_default_returns_all_seed_items() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let items = client.list(ListQuery::default()).await.unwrap();
    assert_eq!(items.len(), 25);
}

#[tokio::test]
async fn test_skip_limit_pagination() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let items = client.list(ListQuery::page(5, 10)).await.unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0].id, 6);
    assert_eq!(items[9].id, 15);
}

#[tokio::test]
async fn test_get_by_id_has_category() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let tx = client.get(1).await.unwrap();
    assert_eq!(tx.description, "Groceries");
    assert_eq!(tx.category_rel.name, "Food");
    assert_eq!(tx.transaction_type, TransactionType::Debit);
}

#[tokio::test]
async fn test_get_missing_id_is_http_error() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let err = client.get(999).await.unwrap_err();
    assert_eq!(err, ClientError::Http { status: 404 });
}

#[tokio::test]
async fn test_view_fetch_uses_limit() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let items = client.load_transactions(3).await.unwrap();
    assert_eq!(items.len(), 3);

    let items = client.load_transactions(1000).await.unwrap();
    assert_eq!(items.len(), 25);
}

#[tokio::test]
async fn test_health_and_cors() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    assert!(client.health().await.is_ok());
    let header = client.cors_allow_origin("http://localhost:3000").await.unwrap();
    assert_eq!(header.as_deref(), Some("*"));
}

#[tokio::test]
async fn test_server_error_maps_to_http_error() {
    let router = Router::new().route(
        "/api/v1/transactions/",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();
    let err = client.load_transactions(1000).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.kind(), FailureKind::HttpError);
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let router = Router::new().route("/api/v1/transactions/", get(|| async { "not json" }));
    let client = ApiClient::new(&spawn(router).await).unwrap();
    let err = client.load_transactions(1000).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
    assert_eq!(err.kind(), FailureKind::FetchFailure);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr)).unwrap();
    let err = client.load_transactions(1000).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_probe_passes_against_reference_backend() {
    let client = ApiClient::new(&spawn(backend()).await).unwrap();
    let expect = ProbeExpectations {
        expected_total: Some(25),
        expected_description: Some("Groceries".to_string()),
        ..ProbeExpectations::default()
    };
    let report = run_probe(&client, &expect).await;
    assert_eq!(report.outcomes.len(), 5);
    assert!(report.all_passed(), "{:?}", report.outcomes);
}

#[tokio::test]
async fn test_probe_reports_missing_cors_and_wrong_total() {
    async fn bare_list() -> Json<Vec<Value>> {
        Json(seed().into_iter().take(7).collect())
    }
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/v1/transactions", get(bare_list));
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let expect = ProbeExpectations {
        expected_total: Some(25),
        ..ProbeExpectations::default()
    };
    let report = run_probe(&client, &expect).await;
    let failed: Vec<&str> = report.failures().map(|o| o.name).collect();
    assert!(failed.contains(&"list"));
    assert!(failed.contains(&"transaction-by-id"));
    assert!(failed.contains(&"pagination"));
    assert!(failed.contains(&"cors"));
    assert!(!failed.contains(&"health"));
}
