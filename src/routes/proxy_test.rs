use axum::Router;
use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

use super::*;
use crate::config::HostConfig;
use crate::routes::api_routes;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(upstream: &str) -> AppState {
    AppState::new(&HostConfig { port: 0, predict_api_url: upstream.to_owned(), connect_timeout_secs: 2 }).unwrap()
}

async fn stub_predict(Path(stage): Path<String>, RawQuery(query): RawQuery, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "predictions": { "stage": stage, "query": query, "echo": body },
    }))
}

async fn stub_history() -> Json<Value> {
    Json(json!([{ "batch_no": "B-1", "order_req_gsm": "160" }]))
}

async fn stub_failure() -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "status": "error", "message": "bad input" })))
}

fn stub_backend() -> Router {
    Router::new()
        .route("/api/predict/{stage}", post(stub_predict))
        .route("/api/history", get(stub_history))
        .route("/api/fail", post(stub_failure))
}

#[test]
fn upstream_url_joins_path_and_query() {
    assert_eq!(upstream_url("http://b:5000", "predict/order", None), "http://b:5000/api/predict/order");
    assert_eq!(upstream_url("http://b:5000/", "history", Some("limit=5")), "http://b:5000/api/history?limit=5");
    assert_eq!(upstream_url("http://b:5000", "history", Some("")), "http://b:5000/api/history");
}

#[test]
fn error_body_matches_backend_shape() {
    assert_eq!(error_body("down"), json!({ "status": "error", "message": "down" }));
}

#[tokio::test]
async fn forwards_post_body_query_and_path() {
    let backend = spawn(stub_backend()).await;
    let host = spawn(api_routes(state_for(&backend))).await;

    let resp = reqwest::Client::new()
        .post(format!("{host}/api/predict/dyeing?trace=1"))
        .json(&json!({ "shade_percent": 2.5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["predictions"]["stage"], "dyeing");
    assert_eq!(body["predictions"]["query"], "trace=1");
    assert_eq!(body["predictions"]["echo"], json!({ "shade_percent": 2.5 }));
}

#[tokio::test]
async fn forwards_get_requests() {
    let backend = spawn(stub_backend()).await;
    let host = spawn(api_routes(state_for(&backend))).await;

    let body: Value = reqwest::get(format!("{host}/api/history")).await.unwrap().json().await.unwrap();
    assert_eq!(body[0]["batch_no"], "B-1");
}

#[tokio::test]
async fn passes_backend_errors_through() {
    let backend = spawn(stub_backend()).await;
    let host = spawn(api_routes(state_for(&backend))).await;

    let resp = reqwest::Client::new()
        .post(format!("{host}/api/fail"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "bad input");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let host = spawn(api_routes(state_for(&closed))).await;

    let resp = reqwest::get(format!("{host}/api/models/info")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("prediction backend unreachable"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let host = spawn(api_routes(state_for("http://127.0.0.1:9"))).await;
    let resp = reqwest::get(format!("{host}/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
