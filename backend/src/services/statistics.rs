//! Statistics over historical weather readings.
//!
//! Everything here is pure: no I/O, no randomness. [`analyze`] computes an
//! independent [`StatRange`] per metric and classifies the averages into a
//! short textual summary.

use std::cmp::Ordering;

use crate::models::{StatRange, WeatherAnalysis, WeatherReading};

/// Average temperature at or above which the period reads as hot.
pub const HOT_TEMPERATURE: f64 = 30.0;
/// Average temperature at or above which the period reads as warm.
pub const WARM_TEMPERATURE: f64 = 20.0;
/// Average temperature at or above which the period reads as mild.
pub const MILD_TEMPERATURE: f64 = 10.0;
/// Average humidity strictly above which the period reads as humid.
pub const HUMID_THRESHOLD: f64 = 70.0;
/// Average wind speed strictly below which winds read as calm.
pub const CALM_WIND_THRESHOLD: f64 = 15.0;

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Arithmetic mean of `values`, or `0.0` when empty.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of `values`, or `0.0` when empty.
///
/// The input is left untouched; a sorted copy is used.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted_copy(values);
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

impl StatRange {
    /// Compute high/low/average over a non-empty series.
    ///
    /// Returns `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        // Summing in sorted order keeps the mean independent of input order.
        let sorted = sorted_copy(values);
        let low = *sorted.first()?;
        let high = *sorted.last()?;

        Some(Self {
            high,
            low,
            average: average(&sorted),
        })
    }
}

/// Sentence describing an average temperature.
pub fn classify_temperature(average: f64) -> &'static str {
    if average >= HOT_TEMPERATURE {
        "Hot temperatures overall."
    } else if average >= WARM_TEMPERATURE {
        "Warm temperatures overall."
    } else if average >= MILD_TEMPERATURE {
        "Mild temperatures overall."
    } else {
        "Cold temperatures overall."
    }
}

/// Sentence describing an average humidity.
pub fn classify_humidity(average: f64) -> &'static str {
    if average > HUMID_THRESHOLD {
        "Humid conditions."
    } else {
        "Comfortable humidity levels."
    }
}

/// Sentence describing an average wind speed.
pub fn classify_wind(average: f64) -> &'static str {
    if average < CALM_WIND_THRESHOLD {
        "Calm winds."
    } else {
        "Windy conditions."
    }
}

/// Build the summary from the three metric ranges.
///
/// Sentences always appear in temperature, humidity, wind order.
pub fn summarize(temperature: &StatRange, humidity: &StatRange, wind_speed: &StatRange) -> String {
    [
        classify_temperature(temperature.average),
        classify_humidity(humidity.average),
        classify_wind(wind_speed.average),
    ]
    .join(" ")
}

/// Analyze a set of readings.
///
/// Returns `None` when `readings` is empty; callers are expected to turn that
/// into a "no data" response before getting here.
pub fn analyze(readings: &[WeatherReading]) -> Option<WeatherAnalysis> {
    if readings.is_empty() {
        return None;
    }

    let temperatures: Vec<f64> = readings.iter().map(|r| f64::from(r.temperature)).collect();
    let humidities: Vec<f64> = readings.iter().map(|r| r.humidity).collect();
    let wind_speeds: Vec<f64> = readings.iter().map(|r| r.wind_speed).collect();

    let temperature = StatRange::from_values(&temperatures)?;
    let humidity = StatRange::from_values(&humidities)?;
    let wind_speed = StatRange::from_values(&wind_speeds)?;
    let summary = summarize(&temperature, &humidity, &wind_speed);

    Some(WeatherAnalysis {
        temperature,
        humidity,
        wind_speed,
        summary,
    })
}
