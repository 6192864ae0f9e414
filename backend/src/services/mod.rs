//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the persistence gateway:
//! generation of synthetic readings, history lookups, and statistics.

pub mod generator;
pub mod statistics;
pub mod weather;


pub use generator::{RandomSource, ReadingGenerator, SeededRandom, ThreadRandom};
pub use statistics::{analyze, average, median};
pub use weather::{
    current_weather, weather_analysis, weather_history, CityAnalysis, WeatherError,
    WeatherResult,
};
