//! End-to-end tests of the relay router against a stub upstream
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::StatusCode;
use fmp_relay::client::FinancialModelingPrep;
use fmp_relay::request::{HttpResponse, Request};
use fmp_relay::server::{self, AppState, UPSTREAM_FAILURE_MESSAGE};
use fmp_relay::{Error, Result};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Canned upstream that records every URL it is asked for
#[derive(Clone)]
struct StubUpstream {
    reply: Reply,
    seen: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
enum Reply {
    Body(u16, String),
    Fail,
    Hang,
}

impl StubUpstream {
    fn json(value: Value) -> Self {
        Self::with(Reply::Body(200, value.to_string()))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Request for StubUpstream {
    type Response = HttpResponse;

    fn new() -> Self {
        Self::json(json!([]))
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.seen.lock().unwrap().push(url.to_string());
        match &self.reply {
            Reply::Body(status, body) => Ok(HttpResponse::new(*status, body.clone(), None)),
            Reply::Fail => Err(Error::Transport("connection refused".to_string())),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(HttpResponse::new(200, "[]", None))
            }
        }
    }
}

fn app(stub: StubUpstream) -> Router {
    let client = FinancialModelingPrep::<StubUpstream>::new()
        .with_client(stub)
        .with_base_url("https://upstream.test/api/v3")
        .with_key("test-key");
    server::router(AppState::new(client, "AAPL"))
}

fn sample() -> Value {
    json!([
        {"date": "2020-01-01", "revenue": 100, "netIncome": 10},
        {"date": "2021-01-01", "revenue": 200, "netIncome": 20}
    ])
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(axum::http::Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_index_is_alive() {
    let resp = app(StubUpstream::json(sample()))
        .oneshot(axum::http::Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_params_returns_everything() {
    let (status, body) = call(app(StubUpstream::json(sample())), "/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, sample());
}

#[tokio::test]
async fn test_fetches_upstream_once_per_request() {
    let stub = StubUpstream::json(sample());
    let seen = stub.seen.clone();
    let router = app(stub);

    call(router.clone(), "/data").await;
    call(router, "/data?min_revenue=1").await;

    let urls = seen.lock().unwrap().clone();
    assert_eq!(urls.len(), 2);
    assert_eq!(
        urls[0],
        "https://upstream.test/api/v3/income-statement/AAPL?period=annual&apikey=test-key"
    );
}

#[tokio::test]
async fn test_min_revenue_filter() {
    let (status, body) = call(app(StubUpstream::json(sample())), "/data?min_revenue=150").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2021-01-01", "revenue": 200, "netIncome": 20}]));
}

#[tokio::test]
async fn test_sort_descending() {
    let (status, body) = call(
        app(StubUpstream::json(sample())),
        "/data?sort_by=revenue&sort_order=desc",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let revenues: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["revenue"].as_i64().unwrap())
        .collect();
    assert_eq!(revenues, vec![200, 100]);
}

#[tokio::test]
async fn test_year_window_and_passthrough_fields() {
    let upstream = json!([
        {"date": "2022-09-24", "symbol": "AAPL", "eps": 6.15, "revenue": 3},
        {"date": "2021-09-25", "symbol": "AAPL", "eps": 5.67, "revenue": 2}
    ]);
    let (status, body) = call(
        app(StubUpstream::json(upstream)),
        "/data?year_start=2021&year_end=2021",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"date": "2021-09-25", "symbol": "AAPL", "eps": 5.67, "revenue": 2}])
    );
}

#[tokio::test]
async fn test_malformed_params_are_ignored() {
    let (status, body) = call(
        app(StubUpstream::json(sample())),
        "/data?year_start=abc&min_revenue=&sort_order=sideways",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, sample());
}

#[tokio::test]
async fn test_empty_upstream_returns_empty_array() {
    let (status, body) = call(
        app(StubUpstream::json(json!([]))),
        "/data?year_start=2000&sort_by=revenue&sort_order=desc",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_transport_failure_hides_detail() {
    let (status, body) = call(app(StubUpstream::with(Reply::Fail)), "/data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": UPSTREAM_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn test_upstream_status_error() {
    let stub = StubUpstream::with(Reply::Body(401, r#"{"Error Message":"Invalid API KEY."}"#.to_string()));
    let (status, body) = call(app(stub), "/data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], UPSTREAM_FAILURE_MESSAGE);
    assert!(!body["error"].as_str().unwrap().contains("API KEY"));
}

#[tokio::test]
async fn test_missing_api_key_is_upstream_failure() {
    let stub = StubUpstream::json(sample());
    let seen = stub.seen.clone();
    let client = FinancialModelingPrep::<StubUpstream>::new().with_client(stub);
    let router = server::router(AppState::new(client, "AAPL"));

    let (status, body) = call(router, "/data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], UPSTREAM_FAILURE_MESSAGE);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_timeout() {
    let client = FinancialModelingPrep::<StubUpstream>::new()
        .with_client(StubUpstream::with(Reply::Hang))
        .with_key("test-key")
        .with_timeout(Duration::from_millis(20));
    let router = server::router(AppState::new(client, "AAPL"));

    let (status, body) = call(router, "/data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], UPSTREAM_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_bad_date_reports_processing_detail() {
    let upstream = json!([
        {"date": "2021-01-01", "revenue": 1},
        {"date": "Q4-2020", "revenue": 2}
    ]);
    let (status, body) = call(app(StubUpstream::json(upstream)), "/data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("failed to process upstream data"));
    assert!(message.contains("Q4-2020"));
}

#[tokio::test]
async fn test_mixed_sort_column_is_processing_error() {
    let upstream = json!([
        {"date": "2021-01-01", "fillingDate": "2021-10-29"},
        {"date": "2020-01-01", "fillingDate": 0}
    ]);
    let (status, body) = call(app(StubUpstream::json(upstream)), "/data?sort_by=fillingDate").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("fillingDate"));
}

#[tokio::test]
async fn test_repeated_key_uses_first_value() {
    let (status, body) = call(
        app(StubUpstream::json(sample())),
        "/data?year_start=2021&year_start=2020",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2021-01-01", "revenue": 200, "netIncome": 20}]));

    let (status, body) = call(
        app(StubUpstream::json(sample())),
        "/data?min_revenue=150&min_revenue=",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2021-01-01", "revenue": 200, "netIncome": 20}]));
}

#[tokio::test]
async fn test_padded_numbers_are_accepted() {
    let (status, body) = call(app(StubUpstream::json(sample())), "/data?year_start=+2021").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2021-01-01", "revenue": 200, "netIncome": 20}]));

    let (status, body) = call(app(StubUpstream::json(sample())), "/data?max_revenue=%20150%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2020-01-01", "revenue": 100, "netIncome": 10}]));
}
