pub mod frontend;
pub mod health;
pub mod measurements;
pub mod outages;

use axum::{
    extract::OriginalUri,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        outages::list_outages,
        outages::create_outage,
        outages::resolve_outage,
        measurements::list_measurements,
        measurements::insert_measurement,
        measurements::insert_measurements,
    ),
    components(
        schemas(
            outages::OutageResponse,
            outages::CreateOutageRequest,
            outages::ResolveOutageRequest,
            measurements::MeasurementResponse,
            measurements::MeasurementRequest,
            measurements::MeasurementWindow,
            measurements::BatchInsertResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "outages", description = "Recorded power outages"),
        (name = "measurements", description = "Electrical measurements"),
    ),
    info(
        title = "PowerMonitor API",
        description = "Power outage and electrical measurement logger",
        version = "0.1.0"
    )
)]
struct ApiDoc;

/// Routes under `/api`.
///
/// Registering the same path and method twice panics here, at startup,
/// instead of one handler silently shadowing the other.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/outages", get(outages::list_outages))
        .route("/outage", post(outages::create_outage))
        .route("/outage/{id}/resolve", post(outages::resolve_outage))
        .route(
            "/measurements",
            get(measurements::list_measurements).post(measurements::insert_measurements),
        )
        .route("/measurement", post(measurements::insert_measurement))
        .fallback(api_not_found)
        .layer(RequestBodyLimitLayer::new(1024 * 1024)) // 1MB body limit
}

pub fn build_router(state: AppState) -> Router {
    tracing::info!(
        frontend_dist = %state.config.frontend_dist.display(),
        "Serving frontend bundle"
    );

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes; anything else is the SPA
    Router::new()
        .nest("/api", api_router())
        .merge(health_routes)
        .merge(docs_routes)
        .fallback_service(frontend::service(&state.config.frontend_dist))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unknown `/api` paths get a JSON 404 rather than the SPA shell.
async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}
