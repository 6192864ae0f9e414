//! Opens the configured store as an `Arc<dyn WeatherRepository>`.
//!
//! The backend comes from the environment (`REPOSITORY_TYPE`, or Postgres when
//! a database URL is present) or from a `repository.toml` file. Callers never
//! name a concrete store type.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
use super::repository::{RepositoryError, RepositoryResult, WeatherRepository};

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RepositoryType {
    /// In-memory, lost on restart
    Local,
    /// Diesel over Postgres
    Postgres,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts `local`, `postgres` or `pg`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "postgres" | "pg" => Ok(Self::Postgres),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl TryFrom<String> for RepositoryType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl RepositoryType {
    /// `REPOSITORY_TYPE` when set; otherwise Postgres if `DATABASE_URL` or
    /// `PG_DATABASE_URL` is present, else Local.
    pub fn from_env() -> RepositoryResult<Self> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(value) => value.parse().map_err(RepositoryError::config),
            Err(_) if has_database_url() => Ok(Self::Postgres),
            Err(_) => Ok(Self::Local),
        }
    }
}

fn has_database_url() -> bool {
    ["DATABASE_URL", "PG_DATABASE_URL"]
        .iter()
        .any(|key| std::env::var_os(key).is_some())
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_disabled() -> RepositoryError {
    RepositoryError::config("postgres backend requested but the postgres-repo feature is off")
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub fn local() -> Arc<dyn WeatherRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Open a Postgres store. Pool setup and migrations run on the blocking pool.
    #[cfg(feature = "postgres-repo")]
    pub async fn postgres(
        config: super::PostgresConfig,
    ) -> RepositoryResult<Arc<dyn WeatherRepository>> {
        let repo = tokio::task::spawn_blocking(move || {
            super::repositories::PostgresRepository::open(&config)
        })
        .await
        .map_err(|e| {
            RepositoryError::connection(super::ErrorContext::new("open_postgres"), e.to_string())
        })??;
        Ok(Arc::new(repo))
    }

    pub async fn from_env() -> RepositoryResult<Arc<dyn WeatherRepository>> {
        match RepositoryType::from_env()? {
            RepositoryType::Local => Ok(Self::local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => Self::postgres(super::PostgresConfig::from_env()?).await,
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => Err(postgres_disabled()),
        }
    }

    pub async fn from_config_file(
        path: impl AsRef<Path>,
    ) -> RepositoryResult<Arc<dyn WeatherRepository>> {
        let config = RepositoryConfig::load(path)?;
        match config.backend() {
            RepositoryType::Local => Ok(Self::local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => Self::postgres(config.postgres_config()?).await,
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => Err(postgres_disabled()),
        }
    }
}
