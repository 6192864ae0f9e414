//! Tests for db::repository::error module.

use std::time::Duration;

use weather_service::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_builders() {
    let ctx = ErrorContext::new("query_history")
        .for_city("London")
        .with_detail("row 7");

    assert_eq!(ctx.operation.as_deref(), Some("query_history"));
    assert_eq!(ctx.city.as_deref(), Some("London"));
    assert_eq!(ctx.detail.as_deref(), Some("row 7"));
}

#[test]
fn test_error_context_display() {
    assert_eq!(ErrorContext::new("save").to_string(), "save");
    assert_eq!(
        ErrorContext::new("query_history").for_city("Paris").to_string(),
        "query_history for Paris"
    );
    assert_eq!(
        ErrorContext::default().with_detail("pool checkout").to_string(),
        "store call (pool checkout)"
    );
}

#[test]
fn test_connection_error_message() {
    let err = RepositoryError::connection(ErrorContext::new("save"), "connection refused");
    assert_eq!(
        err.to_string(),
        "store unreachable during save: connection refused"
    );
}

#[test]
fn test_decode_error_keeps_context() {
    let err = RepositoryError::decode(
        ErrorContext::new("row_to_reading").with_detail("id=3"),
        "unknown conditions 'Foggy'",
    );
    assert!(matches!(err, RepositoryError::Decode { .. }));
    assert_eq!(err.context().unwrap().detail.as_deref(), Some("id=3"));
}

#[test]
fn test_timeout_reports_deadline() {
    let err = RepositoryError::timeout(
        ErrorContext::new("query_all_for_city").for_city("Rome"),
        Duration::from_millis(250),
    );
    assert_eq!(
        err.to_string(),
        "store did not answer within 250ms during query_all_for_city for Rome"
    );
}

#[test]
fn test_during_fills_missing_operation_only() {
    let err =
        RepositoryError::query(ErrorContext::default(), "syntax error").during("fetch_readings");
    assert_eq!(
        err.context().unwrap().operation.as_deref(),
        Some("fetch_readings")
    );

    let err = RepositoryError::decode(ErrorContext::new("row_to_reading"), "bad row")
        .during("fetch_readings");
    assert_eq!(
        err.context().unwrap().operation.as_deref(),
        Some("row_to_reading")
    );
}

#[test]
fn test_config_error_has_no_context() {
    let err = RepositoryError::config("unknown backend 'mongo'").during("open");
    assert!(err.context().is_none());
    assert_eq!(
        err.to_string(),
        "invalid repository configuration: unknown backend 'mongo'"
    );
}
