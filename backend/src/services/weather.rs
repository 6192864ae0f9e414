//! Weather use cases: live generation, history lookup, and analysis.
//!
//! These functions validate input, call the generator or the gateway, and
//! classify failures into [`WeatherError`] so the HTTP layer only has to map
//! kinds to status codes.

use chrono::NaiveDate;

use super::generator::ReadingGenerator;
use super::statistics;
use crate::db::{RepositoryError, WeatherGateway};
use crate::models::{WeatherAnalysis, WeatherReading};

/// Failure kinds of the weather use cases.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The query succeeded but matched no readings.
    #[error("{0}")]
    NotFound(String),

    /// The store failed or timed out.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

pub type WeatherResult<T> = Result<T, WeatherError>;

/// Analysis of every stored reading for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAnalysis {
    pub city: String,
    pub data_points: usize,
    pub analysis: WeatherAnalysis,
}

/// Trim `city` and reject it if nothing is left.
pub fn validate_city(city: Option<&str>) -> WeatherResult<&str> {
    match city.map(str::trim) {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(WeatherError::Validation(
            "City parameter is required".to_string(),
        )),
    }
}

/// Parse an optional `YYYY-MM-DD` lower bound.
///
/// Month and day must be zero-padded; chrono alone would also take `2024-1-5`.
pub fn parse_date_floor(from: Option<&str>) -> WeatherResult<Option<NaiveDate>> {
    let Some(raw) = from.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let padded = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    padded
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
        .map(Some)
        .ok_or_else(|| {
            WeatherError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw))
        })
}

/// Generate (and persist) today's reading for `city`.
pub async fn current_weather(
    generator: &ReadingGenerator,
    city: Option<&str>,
) -> WeatherResult<WeatherReading> {
    let city = validate_city(city)?;
    Ok(generator.generate(city).await)
}

/// Stored readings for `city`, most recent first.
///
/// An empty history is a valid answer, not an error.
pub async fn weather_history(
    gateway: &WeatherGateway,
    city: Option<&str>,
    from: Option<&str>,
) -> WeatherResult<Vec<WeatherReading>> {
    let city = validate_city(city)?;
    let from = parse_date_floor(from)?;
    Ok(gateway.query_history(city, from).await?)
}

/// Statistics over every stored reading for `city`.
pub async fn weather_analysis(
    gateway: &WeatherGateway,
    city: Option<&str>,
) -> WeatherResult<CityAnalysis> {
    let city = validate_city(city)?;
    let readings = gateway.query_all_for_city(city).await?;

    let not_found = || WeatherError::NotFound(format!("No weather data found for {}", city));
    if readings.is_empty() {
        return Err(not_found());
    }
    let analysis = statistics::analyze(&readings).ok_or_else(not_found)?;

    Ok(CityAnalysis {
        city: city.to_string(),
        data_points: readings.len(),
        analysis,
    })
}
