use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{format_timestamp, Store, StoreResult};
use crate::entity::measurements;

/// Rows per INSERT statement. Six bound parameters per row keeps each
/// statement well under SQLite's parameter limit.
const BATCH_SIZE: usize = 100;

/// One electrical reading to append.
#[derive(Debug, Clone)]
pub struct NewMeasurement {
    pub timestamp: String,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub energy: f64,
    pub pf: f64,
}

impl From<NewMeasurement> for measurements::ActiveModel {
    fn from(m: NewMeasurement) -> Self {
        Self {
            timestamp: Set(m.timestamp),
            voltage: Set(m.voltage),
            current: Set(m.current),
            power: Set(m.power),
            energy: Set(m.energy),
            pf: Set(m.pf),
            ..Default::default()
        }
    }
}

impl Store {
    /// Append a single measurement.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_measurement(
        &self,
        measurement: NewMeasurement,
    ) -> StoreResult<measurements::Model> {
        let row = measurements::ActiveModel::from(measurement)
            .insert(&self.db)
            .await?;
        tracing::debug!(measurement_id = row.id, timestamp = %row.timestamp, "Measurement recorded");
        Ok(row)
    }

    /// Append a batch of measurements in one transaction. Either every row
    /// is written or none is.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert or the commit fails; the transaction is
    /// rolled back in that case.
    pub async fn insert_many_measurements(&self, batch: Vec<NewMeasurement>) -> StoreResult<u64> {
        if batch.is_empty() {
            return Ok(0);
        }

        let total = batch.len();
        let models: Vec<measurements::ActiveModel> =
            batch.into_iter().map(measurements::ActiveModel::from).collect();

        let txn = self.db.begin().await?;
        for chunk in models.chunks(BATCH_SIZE) {
            measurements::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        tracing::info!(batch_size = total, "Measurement batch recorded");
        Ok(total as u64)
    }

    /// All measurements in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_measurements(&self) -> StoreResult<Vec<measurements::Model>> {
        let rows = measurements::Entity::find()
            .order_by_asc(measurements::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Measurements stamped at or after `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_measurements_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<Vec<measurements::Model>> {
        let cutoff = format_timestamp(cutoff);
        let rows = measurements::Entity::find()
            .filter(measurements::Column::Timestamp.gte(cutoff.as_str()))
            .order_by_asc(measurements::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!(%cutoff, count = rows.len(), "Measurements queried");
        Ok(rows)
    }

    /// Measurements from the trailing 60 minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_last_hour_measurements(&self) -> StoreResult<Vec<measurements::Model>> {
        self.get_measurements_since(Utc::now() - Duration::hours(1))
            .await
    }

    /// Measurements from the trailing 24 hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_last_24_hours_measurements(&self) -> StoreResult<Vec<measurements::Model>> {
        self.get_measurements_since(Utc::now() - Duration::hours(24))
            .await
    }

    /// Measurements from the trailing 7 days.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_last_week_measurements(&self) -> StoreResult<Vec<measurements::Model>> {
        self.get_measurements_since(Utc::now() - Duration::days(7))
            .await
    }
}
