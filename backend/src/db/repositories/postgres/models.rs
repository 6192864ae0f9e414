use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::weather_readings;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::WeatherReading;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = weather_readings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // id and created_at are only used for ordering in SQL
pub struct WeatherReadingRow {
    pub id: i64,
    pub city: String,
    pub temperature: i32,
    pub conditions: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub date_recorded: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = weather_readings)]
pub struct NewWeatherReadingRow {
    pub city: String,
    pub temperature: i32,
    pub conditions: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub date_recorded: NaiveDate,
}

impl From<&WeatherReading> for NewWeatherReadingRow {
    fn from(reading: &WeatherReading) -> Self {
        Self {
            city: reading.city.clone(),
            temperature: reading.temperature,
            conditions: reading.conditions.to_string(),
            humidity: reading.humidity,
            wind_speed: reading.wind_speed,
            date_recorded: reading.date_recorded,
        }
    }
}

impl TryFrom<WeatherReadingRow> for WeatherReading {
    type Error = RepositoryError;

    fn try_from(row: WeatherReadingRow) -> RepositoryResult<Self> {
        let conditions = row.conditions.parse().map_err(|e: String| {
            RepositoryError::decode(
                ErrorContext::new("row_to_reading")
                    .for_city(row.city.as_str())
                    .with_detail(format!("id={}", row.id)),
                e,
            )
        })?;

        Ok(WeatherReading {
            city: row.city,
            temperature: row.temperature,
            conditions,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            date_recorded: row.date_recorded,
        })
    }
}
