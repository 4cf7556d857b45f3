use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::measurements;
use crate::store::{self, NewMeasurement};

/// Trailing time window for measurement queries
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementWindow {
    /// Every stored measurement
    #[default]
    All,
    /// The last 60 minutes
    Hour,
    /// The last 24 hours
    Day,
    /// The last 7 days
    Week,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MeasurementsQuery {
    /// all (default), hour, day or week
    #[serde(default)]
    #[param(inline)]
    pub window: MeasurementWindow,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeasurementResponse {
    pub id: i32,
    pub timestamp: String,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub energy: f64,
    pub pf: f64,
}

impl From<measurements::Model> for MeasurementResponse {
    fn from(m: measurements::Model) -> Self {
        Self {
            id: m.id,
            timestamp: m.timestamp,
            voltage: m.voltage,
            current: m.current,
            power: m.power,
            energy: m.energy,
            pf: m.pf,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MeasurementRequest {
    /// Defaults to the current UTC time
    pub timestamp: Option<String>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub energy: f64,
    /// Power factor
    pub pf: f64,
}

impl From<MeasurementRequest> for NewMeasurement {
    fn from(r: MeasurementRequest) -> Self {
        Self {
            timestamp: r.timestamp.unwrap_or_else(store::now_timestamp),
            voltage: r.voltage,
            current: r.current,
            power: r.power,
            energy: r.energy,
            pf: r.pf,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchInsertResponse {
    pub inserted: u64,
}
