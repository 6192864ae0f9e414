//! Postgres-backed weather store (Diesel over an r2d2 pool).
//!
//! Migrations embedded from `migrations/` run when the store is opened.
//! Diesel is synchronous, so every statement is executed on the blocking
//! thread pool and issued exactly once.
//!
//! Environment (see [`PostgresConfig::from_env`]):
//! - `DATABASE_URL` or `PG_DATABASE_URL` (required)
//! - `PG_POOL_MAX`, `PG_POOL_MIN`
//! - `PG_CONN_TIMEOUT_SEC`, `PG_IDLE_TIMEOUT_SEC`

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, WeatherRepository};
use crate::models::WeatherReading;

mod models;
mod schema;

use models::{NewWeatherReadingRow, WeatherReadingRow};
use schema::weather_readings;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Connection and pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub database_url: String,
    pub pool_max: u32,
    pub pool_min: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max: 10,
            pool_min: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Read settings from the environment.
    ///
    /// Unset pool variables keep their defaults; set but unparsable ones are
    /// rejected.
    pub fn from_env() -> RepositoryResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::config("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;

        let mut config = Self::new(url);
        if let Some(max) = parse_var("PG_POOL_MAX")? {
            config.pool_max = max;
        }
        if let Some(min) = parse_var("PG_POOL_MIN")? {
            config.pool_min = min;
        }
        if let Some(secs) = parse_var("PG_CONN_TIMEOUT_SEC")? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var("PG_IDLE_TIMEOUT_SEC")? {
            config.idle_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str) -> RepositoryResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map(Some).map_err(|_| {
            RepositoryError::config(format!("{} is not a valid number: {}", key, raw))
        }),
        Err(_) => Ok(None),
    }
}

#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PostgresRepository {
    /// Build the pool and bring the schema up to date. Blocks.
    pub fn open(config: &PostgresConfig) -> RepositoryResult<Self> {
        let pool = Pool::builder()
            .max_size(config.pool_max)
            .min_idle(Some(config.pool_min))
            .connection_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .test_on_check_out(true)
            .build(ConnectionManager::new(config.database_url.as_str()))
            .map_err(|e| {
                RepositoryError::connection(ErrorContext::new("open_pool"), e.to_string())
            })?;

        let mut conn = pool.get().map_err(|e| RepositoryError::from(e).during("run_migrations"))?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::query(ErrorContext::new("run_migrations"), e.to_string())
        })?;

        Ok(Self { pool })
    }

    async fn run_blocking<T, F>(
        &self,
        operation: &'static str,
        city: Option<&str>,
        f: F,
    ) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await;

        let result = joined.unwrap_or_else(|e| {
            Err(RepositoryError::query(
                ErrorContext::default().with_detail("blocking task aborted"),
                e.to_string(),
            ))
        });

        result.map_err(|e| {
            let e = e.during(operation);
            match city {
                Some(city) => e.for_city(city),
                None => e,
            }
        })
    }
}

#[async_trait]
impl WeatherRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.run_blocking("health_check", None, |conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn insert_reading(&self, reading: &WeatherReading) -> RepositoryResult<()> {
        let row = NewWeatherReadingRow::from(reading);
        self.run_blocking("insert_reading", Some(&reading.city), move |conn| {
            diesel::insert_into(weather_readings::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn fetch_readings(
        &self,
        city: &str,
        from: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<WeatherReading>> {
        let wanted = city.to_string();
        self.run_blocking("fetch_readings", Some(city), move |conn| {
            let mut query = weather_readings::table
                .filter(weather_readings::city.eq(wanted))
                .order((weather_readings::date_recorded.desc(), weather_readings::id.desc()))
                .select(WeatherReadingRow::as_select())
                .into_boxed();
            if let Some(floor) = from {
                query = query.filter(weather_readings::date_recorded.ge(floor));
            }

            query
                .load::<WeatherReadingRow>(conn)?
                .into_iter()
                .map(WeatherReading::try_from)
                .collect()
        })
        .await
    }
}
