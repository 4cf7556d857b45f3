use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;

use super::types::{CreateOutageRequest, OutageResponse, OutagesQuery, ResolveOutageRequest};

/// List outages, optionally restricted to a date range
///
/// Filters on the outage's `date`. Both bounds are inclusive; `date` looks up
/// a single day and is shorthand for `start_date = end_date`.
#[utoipa::path(
    get,
    path = "/api/outages",
    params(OutagesQuery),
    responses(
        (status = 200, description = "Outages retrieved successfully", body = Vec<OutageResponse>),
        (status = 400, description = "start_date is after end_date, or date combined with a range"),
    ),
    tag = "outages"
)]
pub async fn list_outages(
    State(state): State<AppState>,
    Query(query): Query<OutagesQuery>,
) -> AppResult<Json<Vec<OutageResponse>>> {
    let rows = match query.bounds()? {
        (None, None) => state.store.get_outages().await?,
        (start, end) => state.store.get_outages_between(start, end).await?,
    };

    Ok(Json(rows.into_iter().map(OutageResponse::from).collect()))
}

/// Record a new outage
#[utoipa::path(
    post,
    path = "/api/outage",
    request_body = CreateOutageRequest,
    responses(
        (status = 201, description = "Outage recorded", body = OutageResponse),
        (status = 400, description = "No date given and none derivable from start_time"),
    ),
    tag = "outages"
)]
pub async fn create_outage(
    State(state): State<AppState>,
    Json(request): Json<CreateOutageRequest>,
) -> AppResult<(StatusCode, Json<OutageResponse>)> {
    let new = request.into_new_outage()?;
    let outage = state.store.create_outage(new).await?;

    Ok((StatusCode::CREATED, Json(outage.into())))
}

/// Resolve an active outage
#[utoipa::path(
    post,
    path = "/api/outage/{id}/resolve",
    params(
        ("id" = i32, Path, description = "Outage ID"),
    ),
    request_body = ResolveOutageRequest,
    responses(
        (status = 200, description = "Outage resolved", body = OutageResponse),
        (status = 404, description = "Outage not found"),
        (status = 409, description = "Outage already resolved"),
    ),
    tag = "outages"
)]
pub async fn resolve_outage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ResolveOutageRequest>,
) -> AppResult<Json<OutageResponse>> {
    let outage = state.store.resolve_outage(id, request.into()).await?;

    Ok(Json(outage.into()))
}
