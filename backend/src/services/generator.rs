//! Synthetic weather reading generation.
//!
//! Readings are pseudo-random, not a forecast. Randomness comes from an
//! injected [`RandomSource`] so tests can seed it or pin exact values.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::db::WeatherGateway;
use crate::models::{Conditions, WeatherReading};

/// Inclusive temperature range in °C.
pub const TEMPERATURE_RANGE: (i32, i32) = (5, 40);
/// Inclusive humidity range in percent.
pub const HUMIDITY_RANGE: (i32, i32) = (0, 100);
/// Wind speeds are drawn from `[0, MAX_WIND_SPEED)` km/h and rounded to 0.1.
pub const MAX_WIND_SPEED: f64 = 50.0;

/// Source of uniform random values.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[low, high]`.
    fn int_inclusive(&self, low: i32, high: i32) -> i32;

    /// Uniform float in `[low, high)`.
    fn float_range(&self, low: f64, high: f64) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local RNG, fresh entropy per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_inclusive(&self, low: i32, high: i32) -> i32 {
        rand::thread_rng().gen_range(low..=high)
    }

    fn float_range(&self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..high)
    }

    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic RNG for reproducible runs.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_inclusive(&self, low: i32, high: i32) -> i32 {
        self.rng.lock().gen_range(low..=high)
    }

    fn float_range(&self, low: f64, high: f64) -> f64 {
        self.rng.lock().gen_range(low..high)
    }

    fn index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Build a reading for `city` dated `date` without touching storage.
pub fn synthesize_reading(
    random: &dyn RandomSource,
    city: &str,
    date: NaiveDate,
) -> WeatherReading {
    let temperature = random.int_inclusive(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
    let conditions = Conditions::ALL[random.index(Conditions::ALL.len())];
    let humidity = f64::from(random.int_inclusive(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1));
    let wind_speed = (random.float_range(0.0, MAX_WIND_SPEED) * 10.0).round() / 10.0;

    WeatherReading {
        city: city.to_string(),
        temperature,
        conditions,
        humidity,
        wind_speed,
        date_recorded: date,
    }
}

/// Generates readings and persists them on a best-effort basis.
#[derive(Clone)]
pub struct ReadingGenerator {
    gateway: WeatherGateway,
    random: Arc<dyn RandomSource>,
}

impl ReadingGenerator {
    /// Generator backed by the thread-local RNG.
    pub fn new(gateway: WeatherGateway) -> Self {
        Self::with_random(gateway, Arc::new(ThreadRandom))
    }

    pub fn with_random(gateway: WeatherGateway, random: Arc<dyn RandomSource>) -> Self {
        Self { gateway, random }
    }

    /// Generate today's reading for `city` and try to store it.
    ///
    /// `city` must already be validated as non-empty. A failed save is logged
    /// and otherwise ignored: the reading is returned either way.
    pub async fn generate(&self, city: &str) -> WeatherReading {
        let today = Utc::now().date_naive();
        let reading = synthesize_reading(self.random.as_ref(), city, today);

        if let Err(e) = self.gateway.save(&reading).await {
            log::warn!("Failed to persist weather reading for {}: {}", city, e);
        }

        reading
    }
}
