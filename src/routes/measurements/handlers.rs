use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::store::NewMeasurement;

use super::types::{
    BatchInsertResponse, MeasurementRequest, MeasurementResponse, MeasurementWindow,
    MeasurementsQuery,
};

/// List measurements
///
/// Returns every measurement, or only those from the trailing hour, day or
/// week.
#[utoipa::path(
    get,
    path = "/api/measurements",
    params(MeasurementsQuery),
    responses(
        (status = 200, description = "Measurements retrieved successfully", body = Vec<MeasurementResponse>),
    ),
    tag = "measurements"
)]
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(query): Query<MeasurementsQuery>,
) -> AppResult<Json<Vec<MeasurementResponse>>> {
    let rows = match query.window {
        MeasurementWindow::All => state.store.get_measurements().await?,
        MeasurementWindow::Hour => state.store.get_last_hour_measurements().await?,
        MeasurementWindow::Day => state.store.get_last_24_hours_measurements().await?,
        MeasurementWindow::Week => state.store.get_last_week_measurements().await?,
    };

    Ok(Json(rows.into_iter().map(MeasurementResponse::from).collect()))
}

/// Record a single measurement
#[utoipa::path(
    post,
    path = "/api/measurement",
    request_body = MeasurementRequest,
    responses(
        (status = 201, description = "Measurement recorded", body = MeasurementResponse),
    ),
    tag = "measurements"
)]
pub async fn insert_measurement(
    State(state): State<AppState>,
    Json(request): Json<MeasurementRequest>,
) -> AppResult<(StatusCode, Json<MeasurementResponse>)> {
    let row = state.store.insert_measurement(request.into()).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Record a batch of measurements
///
/// The batch is written in a single transaction: all rows or none.
#[utoipa::path(
    post,
    path = "/api/measurements",
    request_body = Vec<MeasurementRequest>,
    responses(
        (status = 201, description = "Batch recorded", body = BatchInsertResponse),
    ),
    tag = "measurements"
)]
pub async fn insert_measurements(
    State(state): State<AppState>,
    Json(batch): Json<Vec<MeasurementRequest>>,
) -> AppResult<(StatusCode, Json<BatchInsertResponse>)> {
    let batch: Vec<NewMeasurement> = batch.into_iter().map(NewMeasurement::from).collect();
    let inserted = state.store.insert_many_measurements(batch).await?;

    Ok((StatusCode::CREATED, Json(BatchInsertResponse { inserted })))
}
