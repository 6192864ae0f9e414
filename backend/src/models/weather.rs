//! Weather domain types.
//!
//! A [`WeatherReading`] is a single synthetic observation for a city. Readings
//! are immutable once produced; the statistics types ([`StatRange`],
//! [`WeatherAnalysis`]) are derived on demand and never persisted.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sky conditions attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conditions {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl Conditions {
    /// Every condition, in declaration order.
    pub const ALL: [Conditions; 4] = [
        Conditions::Sunny,
        Conditions::Cloudy,
        Conditions::Rainy,
        Conditions::Stormy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Conditions::Sunny => "Sunny",
            Conditions::Cloudy => "Cloudy",
            Conditions::Rainy => "Rainy",
            Conditions::Stormy => "Stormy",
        }
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conditions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sunny" => Ok(Conditions::Sunny),
            "Cloudy" => Ok(Conditions::Cloudy),
            "Rainy" => Ok(Conditions::Rainy),
            "Stormy" => Ok(Conditions::Stormy),
            other => Err(format!("Unknown weather conditions: {}", other)),
        }
    }
}

/// One weather observation for a city on a given day.
///
/// `date_recorded` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub temperature: i32,
    pub conditions: Conditions,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub date_recorded: NaiveDate,
}

/// High / low / average over one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub high: f64,
    pub low: f64,
    pub average: f64,
}

/// Per-metric statistics plus a human-readable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAnalysis {
    pub temperature: StatRange,
    pub humidity: StatRange,
    pub wind_speed: StatRange,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_round_trip_through_str() {
        for c in Conditions::ALL {
            assert_eq!(c.as_str().parse::<Conditions>().unwrap(), c);
        }
        assert!("Foggy".parse::<Conditions>().is_err());
    }

    #[test]
    fn test_reading_serializes_date_as_iso() {
        let reading = WeatherReading {
            city: "London".to_string(),
            temperature: 18,
            conditions: Conditions::Cloudy,
            humidity: 64.0,
            wind_speed: 12.5,
            date_recorded: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["date_recorded"], "2024-03-07");
        assert_eq!(json["conditions"], "Cloudy");
        assert_eq!(json["wind_speed"], 12.5);
    }
}
