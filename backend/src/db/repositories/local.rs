//! In-memory local repository implementation.
//!
//! Suitable for unit testing and local development. Readings live in a `Vec`
//! behind a lock, so execution is fast, deterministic, and isolated.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, WeatherRepository};
use crate::models::WeatherReading;

/// In-memory local repository.
///
/// # Example
/// ```
/// use weather_service::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert!(repo.is_empty());
///
/// // Simulate an unreachable store
/// repo.set_healthy(false);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct StoredReading {
    id: i64,
    reading: WeatherReading,
}

struct LocalData {
    readings: Vec<StoredReading>,
    next_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            readings: Vec::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing store failures.
    ///
    /// While unhealthy every read and write returns a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of stored readings across all cities.
    pub fn len(&self) -> usize {
        self.data.read().readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_health(&self, operation: &str, city: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection(
                ErrorContext::new(operation).for_city(city),
                "store marked unhealthy",
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_reading(&self, reading: &WeatherReading) -> RepositoryResult<()> {
        self.check_health("insert_reading", &reading.city)?;

        let mut data = self.data.write();
        let id = data.next_id;
        data.next_id += 1;
        data.readings.push(StoredReading {
            id,
            reading: reading.clone(),
        });

        Ok(())
    }

    async fn fetch_readings(
        &self,
        city: &str,
        from: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<WeatherReading>> {
        self.check_health("fetch_readings", city)?;

        let data = self.data.read();
        let mut matches: Vec<&StoredReading> = data
            .readings
            .iter()
            .filter(|stored| stored.reading.city == city)
            .filter(|stored| from.map_or(true, |floor| stored.reading.date_recorded >= floor))
            .collect();

        matches.sort_by(|a, b| {
            b.reading
                .date_recorded
                .cmp(&a.reading.date_recorded)
                .then(b.id.cmp(&a.id))
        });

        Ok(matches.into_iter().map(|s| s.reading.clone()).collect())
    }
}
