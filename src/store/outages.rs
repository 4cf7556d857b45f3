use chrono::NaiveDate;
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{format_date, Store, StoreError, StoreResult};
use crate::entity::outages::{self, OutageStatus};

/// Fields supplied when an outage starts.
#[derive(Debug, Clone)]
pub struct NewOutage {
    pub start_time: String,
    pub date: String,
    pub voltage_before: f64,
}

/// Fields supplied when an outage ends.
#[derive(Debug, Clone)]
pub struct OutageResolution {
    pub end_time: String,
    pub voltage_after: f64,
}

impl Store {
    /// Record a new outage in the `Active` state.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_outage(&self, new: NewOutage) -> StoreResult<outages::Model> {
        let outage = outages::ActiveModel {
            start_time: Set(new.start_time),
            end_time: Set(None),
            date: Set(new.date),
            status: Set(OutageStatus::Active),
            voltage_before: Set(new.voltage_before),
            voltage_after: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            outage_id = outage.id,
            start_time = %outage.start_time,
            voltage_before = outage.voltage_before,
            "Outage recorded"
        );

        Ok(outage)
    }

    /// Mark outage `id` as resolved.
    ///
    /// The update only matches an `Active` row, so two racing resolutions of
    /// the same outage cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `OutageNotFound` for an unknown id, `OutageAlreadyResolved` if
    /// the outage was resolved before, or a database error.
    pub async fn resolve_outage(
        &self,
        id: i32,
        resolution: OutageResolution,
    ) -> StoreResult<outages::Model> {
        let result = outages::Entity::update_many()
            .col_expr(outages::Column::EndTime, Expr::value(resolution.end_time))
            .col_expr(
                outages::Column::Status,
                Expr::value(OutageStatus::Resolved.to_value()),
            )
            .col_expr(
                outages::Column::VoltageAfter,
                Expr::value(resolution.voltage_after),
            )
            .filter(outages::Column::Id.eq(id))
            .filter(outages::Column::Status.eq(OutageStatus::Active))
            .exec(&self.db)
            .await?;

        let outage = outages::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::OutageNotFound(id))?;

        if result.rows_affected == 0 {
            return Err(StoreError::OutageAlreadyResolved(id));
        }

        tracing::info!(
            outage_id = id,
            end_time = ?outage.end_time,
            voltage_after = ?outage.voltage_after,
            "Outage resolved"
        );

        Ok(outage)
    }

    /// All outages in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_outages(&self) -> StoreResult<Vec<outages::Model>> {
        let rows = outages::Entity::find()
            .order_by_asc(outages::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Outages whose `date` falls within `[start, end]`. A missing bound
    /// leaves that side of the range open.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_outages_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<outages::Model>> {
        let mut query = outages::Entity::find();

        if let Some(start) = start {
            query = query.filter(outages::Column::Date.gte(format_date(start)));
        }
        if let Some(end) = end {
            query = query.filter(outages::Column::Date.lte(format_date(end)));
        }

        let rows = query
            .order_by_asc(outages::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!(?start, ?end, count = rows.len(), "Outages queried");
        Ok(rows)
    }
}
