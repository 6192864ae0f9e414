//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `WEATHER_IO_TIMEOUT_MS`: Deadline for a single store call (default: 5000)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: Login credentials (default: admin / admin123)

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::db::DEFAULT_IO_TIMEOUT;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The single admin credential pair accepted by `/admin/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub io_timeout: Duration,
    pub admin: AdminCredentials,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            io_timeout: DEFAULT_IO_TIMEOUT,
            admin: AdminCredentials::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns an error if `PORT` or `WEATHER_IO_TIMEOUT_MS` is set but not a
    /// valid number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            Err(_) => defaults.port,
        };
        let io_timeout = match env::var("WEATHER_IO_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .with_context(|| format!("Invalid WEATHER_IO_TIMEOUT_MS value: {}", raw))?,
            ),
            Err(_) => defaults.io_timeout,
        };
        let admin = AdminCredentials::new(
            env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
        );

        Ok(Self {
            host,
            port,
            io_timeout,
            admin,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
