//! # Weather Service
//!
//! A small HTTP service that returns simulated weather readings for a city,
//! stores them, and reports statistics over the stored history.
//!
//! ## Architecture
//!
//! - [`models`]: Reading, statistic range, and analysis types
//! - [`services`]: Reading generation, history lookup, statistics engine
//! - [`db`]: Repository trait, in-memory and Postgres backends, timeout-bounded gateway
//! - [`config`]: Server settings from environment variables
//! - [`http`]: Axum router and request handlers
//!
//! Readings are pseudo-random; nothing here forecasts real weather.

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
