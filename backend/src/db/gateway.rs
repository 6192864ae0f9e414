//! Persistence gateway: the only path from the service layer to storage.
//!
//! Every call is bounded by an I/O deadline. A store that does not answer in
//! time surfaces as [`RepositoryError::Timeout`], never as a hang.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult, WeatherRepository};
use crate::models::WeatherReading;

/// Default deadline for a single store operation.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout-bounded access to a [`WeatherRepository`].
#[derive(Clone)]
pub struct WeatherGateway {
    repository: Arc<dyn WeatherRepository>,
    io_timeout: Duration,
}

impl WeatherGateway {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self::with_timeout(repository, DEFAULT_IO_TIMEOUT)
    }

    pub fn with_timeout(repository: Arc<dyn WeatherRepository>, io_timeout: Duration) -> Self {
        Self {
            repository,
            io_timeout,
        }
    }

    pub fn io_timeout(&self) -> Duration {
        self.io_timeout
    }

    async fn bounded<T, F>(
        &self,
        operation: &str,
        city: Option<&str>,
        fut: F,
    ) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        log::debug!("{} city={}", operation, city.unwrap_or("-"));
        match tokio::time::timeout(self.io_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let err = RepositoryError::timeout(ErrorContext::new(operation), self.io_timeout);
                Err(match city {
                    Some(city) => err.for_city(city),
                    None => err,
                })
            }
        }
    }

    /// Check store health.
    pub async fn health_check(&self) -> RepositoryResult<bool> {
        self.bounded("health_check", None, self.repository.health_check())
            .await
    }

    /// Append one reading.
    pub async fn save(&self, reading: &WeatherReading) -> RepositoryResult<()> {
        self.bounded(
            "save",
            Some(&reading.city),
            self.repository.insert_reading(reading),
        )
        .await
    }

    /// Readings for `city`, most recent first, optionally on or after `from`.
    ///
    /// No stored readings is `Ok(vec![])`.
    pub async fn query_history(
        &self,
        city: &str,
        from: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<WeatherReading>> {
        self.bounded(
            "query_history",
            Some(city),
            self.repository.fetch_readings(city, from),
        )
        .await
    }

    /// Every reading stored for `city`, most recent first.
    pub async fn query_all_for_city(&self, city: &str) -> RepositoryResult<Vec<WeatherReading>> {
        self.bounded(
            "query_all_for_city",
            Some(city),
            self.repository.fetch_readings(city, None),
        )
        .await
    }
}
