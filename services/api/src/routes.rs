use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use leaseflow::error::AppError;
use leaseflow::workflows::booking::{
    is_range_covered, resolve_display_window, DateRange, WeeklySchedule,
};
use leaseflow::workflows::leasing::{lease_router, LeaseBackend, LeaseLifecycleService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityRequest {
    pub(crate) schedule: WeeklySchedule,
    pub(crate) from: NaiveDate,
    pub(crate) to: NaiveDate,
    #[serde(default = "default_time_zone")]
    pub(crate) time_zone: String,
}

fn default_time_zone() -> String {
    "CST".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityResponse {
    pub(crate) covered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) display_window: Option<String>,
}

pub(crate) fn with_lease_routes<B>(service: Arc<LeaseLifecycleService<B>>) -> axum::Router
where
    B: LeaseBackend + 'static,
{
    lease_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/booking/availability",
            axum::routing::post(availability_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn availability_endpoint(
    Json(payload): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    payload.schedule.check_menu_times()?;
    let range = DateRange::new(payload.from, payload.to)?;
    let covered = is_range_covered(&range, &payload.schedule);
    let display_window = resolve_display_window(&range, &payload.schedule, &payload.time_zone);

    Ok(Json(AvailabilityResponse {
        covered,
        display_window,
    }))
}
