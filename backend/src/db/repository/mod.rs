//! Repository trait for weather reading storage.
//!
//! The store is deliberately small: it appends readings and returns them per
//! city. Filtering by date and ordering by recency are part of the contract so
//! every backend answers queries identically.
//!
//! - [`error`]: Error types for repository operations

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::WeatherReading;

/// Storage operations for weather readings.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Append one reading.
    async fn insert_reading(&self, reading: &WeatherReading) -> RepositoryResult<()>;

    /// Fetch every reading stored for `city`.
    ///
    /// When `from` is set only readings recorded on or after that date are
    /// returned. Results are ordered most recent first: by `date_recorded`
    /// descending, then by insertion order descending. No matches is
    /// `Ok(vec![])`.
    async fn fetch_readings(
        &self,
        city: &str,
        from: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<WeatherReading>>;
}
