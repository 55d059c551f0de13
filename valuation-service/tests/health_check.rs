mod common;

use common::{FixedPriceModel, TestApp};
use reqwest::Client;
use std::sync::Arc;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_with_model(Arc::new(FixedPriceModel(1.0))).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "valuation-service");
}

#[tokio::test]
async fn readiness_reports_model() {
    let app = TestApp::spawn_with_model(Arc::new(FixedPriceModel(1.0))).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["model"], "fixed");
    assert_eq!(body["model_version"], "test");
}

#[tokio::test]
async fn model_info_lists_range_table_in_order() {
    let app = TestApp::spawn_with_model(Arc::new(FixedPriceModel(1.0))).await;

    let body: serde_json::Value = Client::new()
        .get(format!("{}/model", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    let keys: Vec<_> = body["ranges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, ["sq_ft", "beds", "baths", "age", "parking", "rank"]);
    assert_eq!(body["features"][0], "square_feet");
    assert_eq!(body["ranges"][0]["maximum"], 10000.0);
}

#[tokio::test]
async fn index_serves_valuation_page() {
    let app = TestApp::spawn_with_model(Arc::new(FixedPriceModel(1.0))).await;

    let response = Client::new()
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let page = response.text().await.unwrap();
    assert!(page.contains("House Price Valuation"));
    assert!(page.contains(r#"name="square_feet""#));
    assert!(page.contains("Neighborhood Rating"));
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    let app = TestApp::spawn_with_model(Arc::new(FixedPriceModel(1.0))).await;
    let client = Client::new();

    app.post_json(&serde_json::json!({})).await;

    let text = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(text.contains("valuation_requests_total"));
    assert!(text.contains("http_requests_total"));
}
