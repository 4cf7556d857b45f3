use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::outages::{self, OutageStatus};
use crate::error::{AppError, AppResult};
use crate::store::{self, NewOutage, OutageResolution};

#[derive(Debug, Serialize, ToSchema)]
pub struct OutageResponse {
    pub id: i32,
    pub start_time: String,
    /// Null while the outage is active
    pub end_time: Option<String>,
    pub date: String,
    /// `Active` or `Resolved`
    #[schema(value_type = String, example = "Active")]
    pub status: OutageStatus,
    pub voltage_before: f64,
    /// Null while the outage is active
    pub voltage_after: Option<f64>,
}

impl From<outages::Model> for OutageResponse {
    fn from(o: outages::Model) -> Self {
        Self {
            id: o.id,
            start_time: o.start_time,
            end_time: o.end_time,
            date: o.date,
            status: o.status,
            voltage_before: o.voltage_before,
            voltage_after: o.voltage_after,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OutagesQuery {
    /// First day of the range, inclusive (YYYY-MM-DD). Open if omitted.
    pub start_date: Option<NaiveDate>,
    /// Last day of the range, inclusive (YYYY-MM-DD). Open if omitted.
    pub end_date: Option<NaiveDate>,
    /// A single day (YYYY-MM-DD). Cannot be combined with a range.
    pub date: Option<NaiveDate>,
}

impl OutagesQuery {
    /// Resolve the query into inclusive `(start, end)` bounds.
    pub fn bounds(&self) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        if let Some(date) = self.date {
            if self.start_date.is_some() || self.end_date.is_some() {
                return Err(AppError::BadRequest(
                    "date cannot be combined with start_date or end_date".to_string(),
                ));
            }
            return Ok((Some(date), Some(date)));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(AppError::BadRequest(format!(
                "start_date ({start}) must not be after end_date ({end})"
            )));
        }

        Ok((self.start_date, self.end_date))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOutageRequest {
    /// Defaults to the current UTC time
    pub start_time: Option<String>,
    /// Defaults to the date prefix of `start_time`
    pub date: Option<String>,
    pub voltage_before: f64,
}

impl CreateOutageRequest {
    pub fn into_new_outage(self) -> AppResult<NewOutage> {
        let start_time = self.start_time.unwrap_or_else(store::now_timestamp);

        let date = match self.date {
            Some(date) => date,
            None => date_prefix(&start_time).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "date is required when start_time ({start_time:?}) does not begin with YYYY-MM-DD"
                ))
            })?,
        };

        Ok(NewOutage {
            start_time,
            date,
            voltage_before: self.voltage_before,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveOutageRequest {
    /// Defaults to the current UTC time
    pub end_time: Option<String>,
    pub voltage_after: f64,
}

impl From<ResolveOutageRequest> for OutageResolution {
    fn from(r: ResolveOutageRequest) -> Self {
        Self {
            end_time: r.end_time.unwrap_or_else(store::now_timestamp),
            voltage_after: r.voltage_after,
        }
    }
}

/// Calendar date at the start of a timestamp, e.g. `2025-01-01` from
/// `2025-01-01 12:00:00` or `2025-01-01T12:00:00Z`.
fn date_prefix(timestamp: &str) -> Option<String> {
    let prefix = timestamp.get(..10)?;
    NaiveDate::parse_from_str(prefix, store::DATE_FORMAT)
        .ok()
        .map(store::format_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_defaults_to_start_time_prefix() {
        let new = CreateOutageRequest {
            start_time: Some("2025-01-01 12:00:00".to_string()),
            date: None,
            voltage_before: 120.0,
        }
        .into_new_outage()
        .unwrap();

        assert_eq!(new.date, "2025-01-01");
        assert_eq!(new.start_time, "2025-01-01 12:00:00");
    }

    #[test]
    fn explicit_date_is_kept_independent_of_start_time() {
        let new = CreateOutageRequest {
            start_time: Some("2025-01-01 23:59:00".to_string()),
            date: Some("2025-01-02".to_string()),
            voltage_before: 120.0,
        }
        .into_new_outage()
        .unwrap();

        assert_eq!(new.date, "2025-01-02");
    }

    #[test]
    fn free_form_start_time_without_date_is_rejected() {
        let result = CreateOutageRequest {
            start_time: Some("T0".to_string()),
            date: None,
            voltage_before: 120.0,
        }
        .into_new_outage();

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rfc3339_start_time_yields_date() {
        assert_eq!(
            date_prefix("2024-01-15T14:23:00Z").as_deref(),
            Some("2024-01-15")
        );
        assert_eq!(date_prefix("15/01/2024"), None);
    }
}
