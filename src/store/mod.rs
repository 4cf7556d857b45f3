//! SQLite-backed persistence for outages and measurements.
//!
//! A [`Store`] owns its database connection. It is opened with
//! [`Store::connect`], prepared with [`Store::initialize_schema`] and released
//! with [`Store::close`]. Every mutation commits on its own, except
//! [`Store::insert_many_measurements`] which commits the whole batch in one
//! transaction.
//!
//! Timestamps are stored as text. Everything the store generates itself uses
//! [`TIMESTAMP_FORMAT`] in UTC, so trailing-window queries compare correctly
//! as strings as long as writers use the same format.

mod measurements;
mod outages;

use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;

pub use measurements::NewMeasurement;
pub use outages::{NewOutage, OutageResolution};

/// Canonical text form for timestamps, matching SQLite's `datetime()`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical text form for the denormalized outage `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Current UTC time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Outage {0} not found")]
    OutageNotFound(i32),

    #[error("Outage {0} is already resolved")]
    OutageAlreadyResolved(i32),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone, Debug)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    /// Open the database at `database_url`.
    ///
    /// The pool is pinned to a single connection that is never recycled:
    /// SQLite has one writer, and an in-memory database only lives as long
    /// as its connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the database cannot be opened.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        tracing::debug!("Store connection opened");

        Ok(Self { db })
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Create the `outages` and `measurements` tables if they do not exist.
    ///
    /// Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn initialize_schema(&self) -> StoreResult<()> {
        migration::Migrator::up(&self.db, None).await?;
        tracing::debug!("Store schema ready");
        Ok(())
    }

    /// Release the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool fails to shut down cleanly.
    pub async fn close(self) -> StoreResult<()> {
        self.db.close().await?;
        tracing::debug!("Store connection closed");
        Ok(())
    }
}
