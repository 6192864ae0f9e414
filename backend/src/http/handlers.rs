//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::dto::{
    AnalysisResponse, HealthResponse, HistoryQuery, HistoryResponse, LoginRequest, LoginResponse,
    WeatherQuery, WeatherResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e.body_text())))
}

fn city_param(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path.map(|Path(city)| city)
        .map_err(|e| AppError::BadRequest(format!("Invalid city in path: {}", e.body_text())))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.gateway.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Weather
// =============================================================================

/// GET /weather?city=<name>
///
/// Generate today's reading for a city. The reading is stored on a best-effort basis.
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> HandlerResult<WeatherResponse> {
    let query = query_params(query)?;
    let reading = services::current_weather(&state.generator, query.city.as_deref()).await?;

    Ok(Json(WeatherResponse {
        success: true,
        data: reading,
    }))
}

/// GET /weather/history/{city}?from=<YYYY-MM-DD>
///
/// Stored readings for a city, most recent first.
pub async fn get_weather_history(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> HandlerResult<HistoryResponse> {
    let city = city_param(city)?;
    let query = query_params(query)?;
    let readings =
        services::weather_history(&state.gateway, Some(&city), query.from.as_deref()).await?;

    Ok(Json(HistoryResponse {
        success: true,
        city: city.trim().to_string(),
        data_points: readings.len(),
        data: readings,
    }))
}

/// GET /weather/analysis/{city}
///
/// High/low/average per metric plus a summary over every stored reading.
pub async fn get_weather_analysis(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> HandlerResult<AnalysisResponse> {
    let city = city_param(city)?;
    let result = services::weather_analysis(&state.gateway, Some(&city)).await?;
    Ok(Json(result.into()))
}

// =============================================================================
// Admin
// =============================================================================

/// POST /admin/login
///
/// Compare the submitted pair against the configured admin credentials.
pub async fn admin_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> HandlerResult<LoginResponse> {
    let Json(request) =
        body.map_err(|e| AppError::BadRequest(format!("Invalid login request: {}", e)))?;

    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    if !state.admin.matches(&username, &password) {
        tracing::warn!(%username, "rejected admin login");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}
