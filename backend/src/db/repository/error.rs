//! Failures raised by weather stores.
//!
//! A store call fails in one of four ways: the store is unreachable, it
//! rejects the statement, a stored row no longer decodes into a
//! [`WeatherReading`](crate::models::WeatherReading), or it does not answer
//! before the gateway deadline. Picking a backend can also fail, which is a
//! configuration problem rather than a store failure.

use std::fmt;
use std::time::Duration;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a store failure happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Store operation, e.g. `query_history`.
    pub operation: Option<String>,
    /// City the operation was scoped to, if any.
    pub city: Option<String>,
    /// Backend-specific detail such as a row id or a Postgres error kind.
    pub detail: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn for_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.as_deref().unwrap_or("store call"))?;
        if let Some(city) = &self.city {
            write!(f, " for {}", city)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store unreachable during {context}: {message}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    #[error("query failed during {context}: {message}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    /// A stored row could not be turned back into a reading.
    #[error("could not decode stored reading during {context}: {message}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    /// The store did not answer within the gateway deadline.
    #[error("store did not answer within {after:?} during {context}")]
    Timeout {
        after: Duration,
        context: ErrorContext,
    },

    /// Backend selection or settings are unusable.
    #[error("invalid repository configuration: {0}")]
    Config(String),
}

impl RepositoryError {
    pub fn connection(context: ErrorContext, message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context,
        }
    }

    pub fn query(context: ErrorContext, message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context,
        }
    }

    pub fn decode(context: ErrorContext, message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context,
        }
    }

    pub fn timeout(context: ErrorContext, after: Duration) -> Self {
        Self::Timeout { after, context }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Context of a store failure; `None` for configuration errors.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::Decode { context, .. }
            | Self::Timeout { context, .. } => Some(context),
            Self::Config(_) => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::Decode { context, .. }
            | Self::Timeout { context, .. } => Some(context),
            Self::Config(_) => None,
        }
    }

    /// Name the operation on an error raised below it, keeping any name
    /// already set closer to the failure.
    pub fn during(mut self, operation: &str) -> Self {
        if let Some(context) = self.context_mut() {
            context.operation.get_or_insert_with(|| operation.to_string());
        }
        self
    }

    /// Attach the city the failing call was scoped to, unless already known.
    pub fn for_city(mut self, city: &str) -> Self {
        if let Some(context) = self.context_mut() {
            context.city.get_or_insert_with(|| city.to_string());
        }
        self
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error as Diesel;

        match err {
            Diesel::DatabaseError(kind, info) => Self::query(
                ErrorContext::default().with_detail(format!("{:?}", kind)),
                info.message(),
            ),
            Diesel::DeserializationError(e) => Self::decode(ErrorContext::default(), e.to_string()),
            other => Self::query(ErrorContext::default(), other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::connection(ErrorContext::default().with_detail("pool checkout"), err.to_string())
    }
}
