use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use learnwell::courses::{course_router, CourseState};
use learnwell::profiles::{profile_router, ProfileRepository, ProfileService};
use serde_json::json;
use std::sync::Arc;

/// Profile and course routes plus the operational endpoints. `AppState` is
/// expected as an `Extension` layer.
pub(crate) fn build_router<R>(
    profile_service: Arc<ProfileService<R>>,
    course_state: CourseState,
) -> axum::Router
where
    R: ProfileRepository + 'static,
{
    profile_router(profile_service)
        .merge(course_router(course_state))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
