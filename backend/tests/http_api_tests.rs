//! End-to-end tests of the HTTP API against the in-memory repository.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use weather_service::config::{AdminCredentials, ServerConfig};
use weather_service::db::{LocalRepository, WeatherRepository};
use weather_service::http::{create_router, AppState};
use weather_service::models::{Conditions, WeatherReading};
use weather_service::services::SeededRandom;

fn app(repo: Arc<LocalRepository>) -> Router {
    let config = ServerConfig {
        admin: AdminCredentials::new("admin", "s3cret"),
        ..ServerConfig::default()
    };
    let state = AppState::from_config(repo, &config).with_random(Arc::new(SeededRandom::new(11)));
    create_router(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn seed(repo: &LocalRepository, city: &str, rows: &[(i32, f64, f64, u32)]) {
    for &(temperature, humidity, wind_speed, day) in rows {
        repo.insert_reading(&WeatherReading {
            city: city.to_string(),
            temperature,
            conditions: Conditions::Sunny,
            humidity,
            wind_speed,
            date_recorded: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
        })
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(Arc::new(LocalRepository::new())), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_weather_generates_and_stores() {
    let repo = Arc::new(LocalRepository::new());
    let (status, body) = get(app(repo.clone()), "/weather?city=London").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["city"], "London");
    let temperature = body["data"]["temperature"].as_i64().unwrap();
    assert!((5..=40).contains(&temperature));
    let date = body["data"]["date_recorded"].as_str().unwrap();
    assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_weather_missing_city_is_bad_request() {
    let repo = Arc::new(LocalRepository::new());

    let (status, body) = get(app(repo.clone()), "/weather").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "City parameter is required" }));

    let (status, _) = get(app(repo.clone()), "/weather?city=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_weather_still_served_when_store_is_down() {
    let repo = Arc::new(LocalRepository::new());
    repo.set_healthy(false);

    let (status, body) = get(app(repo), "/weather?city=Oslo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], "Oslo");
}

#[tokio::test]
async fn test_history_lists_most_recent_first() {
    let repo = Arc::new(LocalRepository::new());
    seed(&repo, "Lisbon", &[(21, 55.0, 8.0, 1), (23, 60.0, 9.0, 3), (22, 58.0, 7.0, 2)]).await;

    let (status, body) = get(app(repo.clone()), "/weather/history/Lisbon").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Lisbon");
    assert_eq!(body["dataPoints"], 3);
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date_recorded"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-08-03", "2024-08-02", "2024-08-01"]);

    let (_, body) = get(app(repo), "/weather/history/Lisbon?from=2024-08-02").await;
    assert_eq!(body["dataPoints"], 2);
}

#[tokio::test]
async fn test_history_empty_is_success() {
    let (status, body) = get(app(Arc::new(LocalRepository::new())), "/weather/history/Nowhere").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["dataPoints"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_history_invalid_from_is_bad_request() {
    let (status, body) = get(
        app(Arc::new(LocalRepository::new())),
        "/weather/history/Lisbon?from=08-2024",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_history_unpadded_from_is_bad_request() {
    let (status, body) = get(
        app(Arc::new(LocalRepository::new())),
        "/weather/history/Lisbon?from=2024-1-5",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Invalid date '2024-1-5': expected YYYY-MM-DD" })
    );
}

#[tokio::test]
async fn test_malformed_query_strings_use_error_envelope() {
    let repo = Arc::new(LocalRepository::new());

    for uri in [
        "/weather?city=London&city=Paris",
        "/weather/history/Rome?from=2024-01-01&from=2024-02-01",
    ] {
        let (status, body) = get(app(repo.clone()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false, "{}", uri);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid query string"), "{}: {}", uri, error);
    }
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_non_utf8_city_uses_error_envelope() {
    for uri in ["/weather/history/%FF", "/weather/analysis/%FF"] {
        let (status, body) = get(app(Arc::new(LocalRepository::new())), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false, "{}", uri);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid city in path"), "{}: {}", uri, error);
    }
}

#[tokio::test]
async fn test_history_store_failure_is_server_error() {
    let repo = Arc::new(LocalRepository::new());
    repo.set_healthy(false);

    let (status, body) = get(app(repo), "/weather/history/Lisbon").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Database error"), "{}", error);
    assert!(error.contains("fetch_readings for Lisbon"), "{}", error);
}

#[tokio::test]
async fn test_analysis() {
    let repo = Arc::new(LocalRepository::new());
    seed(&repo, "London", &[(20, 60.0, 10.0, 1), (25, 70.0, 15.0, 2), (15, 50.0, 5.0, 3)]).await;

    let (status, body) = get(app(repo), "/weather/analysis/London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["dataPoints"], 3);
    assert_eq!(
        body["analysis"]["temperature"],
        json!({ "high": 25.0, "low": 15.0, "average": 20.0 })
    );
    assert_eq!(
        body["analysis"]["humidity"],
        json!({ "high": 70.0, "low": 50.0, "average": 60.0 })
    );
    assert_eq!(
        body["analysis"]["wind_speed"],
        json!({ "high": 15.0, "low": 5.0, "average": 10.0 })
    );
    assert_eq!(
        body["analysis"]["summary"],
        "Warm temperatures overall. Comfortable humidity levels. Calm winds."
    );
}

#[tokio::test]
async fn test_analysis_without_data_is_not_found() {
    let (status, body) = get(app(Arc::new(LocalRepository::new())), "/weather/analysis/London").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "success": false, "error": "No weather data found for London" })
    );
}

#[tokio::test]
async fn test_analysis_store_failure_is_server_error() {
    let repo = Arc::new(LocalRepository::new());
    repo.set_healthy(false);

    let (status, _) = get(app(repo), "/weather/analysis/London").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_admin_login() {
    let repo = Arc::new(LocalRepository::new());

    let (status, body) = post_json(
        app(repo.clone()),
        "/admin/login",
        json!({ "username": "admin", "password": "s3cret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = post_json(
        app(repo.clone()),
        "/admin/login",
        json!({ "username": "admin", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "error": "Invalid credentials" }));

    let (status, _) = post_json(app(repo), "/admin/login", json!({ "username": "admin" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_login_rejects_non_json_body() {
    let request = Request::post("/admin/login")
        .body(Body::from("username=admin"))
        .unwrap();
    let (status, body) = send(app(Arc::new(LocalRepository::new())), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
