//! Data Transfer Objects for the HTTP API.
//!
//! Success responses carry `success: true` next to their payload; the
//! failure envelope lives in [`super::error::ApiError`].

use serde::{Deserialize, Serialize};

use crate::models::{WeatherAnalysis, WeatherReading};
use crate::services::CityAnalysis;

/// Query parameters for `GET /weather`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: Option<String>,
}

/// Query parameters for `GET /weather/history/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(default)]
    pub from: Option<String>,
}

/// Request body for `POST /admin/login`. Both fields are checked for presence
/// in the handler so a missing field yields the standard envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub data: WeatherReading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub city: String,
    pub data_points: usize,
    pub data: Vec<WeatherReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub city: String,
    pub data_points: usize,
    pub analysis: WeatherAnalysis,
}

impl From<CityAnalysis> for AnalysisResponse {
    fn from(result: CityAnalysis) -> Self {
        Self {
            success: true,
            city: result.city,
            data_points: result.data_points,
            analysis: result.analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
