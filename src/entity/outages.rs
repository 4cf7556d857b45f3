use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of an outage. Stored as text; transitions once from `Active`
/// to `Resolved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OutageStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Resolved")]
    Resolved,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_time: String,
    pub end_time: Option<String>,
    /// Calendar date of the outage, kept alongside `start_time`.
    pub date: String,
    pub status: OutageStatus,
    pub voltage_before: f64,
    pub voltage_after: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
