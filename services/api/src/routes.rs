use crate::infra::{AppState, Portal};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use internship_portal::error::AppError;
use internship_portal::portal::applications::{ApplicationView, NewApplication};
use internship_portal::portal::offers::OfferId;
use internship_portal::portal::{application_router, offer_router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplyRequest {
    #[serde(default)]
    pub(crate) applied_on: Option<NaiveDate>,
}

pub(crate) fn with_portal_routes(portal: Portal) -> Router {
    let apply = Router::new()
        .route("/api/v1/offers/:offer_id/apply", post(apply_endpoint))
        .with_state(portal.clone());

    application_router(portal.tracker)
        .merge(offer_router(portal.catalog))
        .merge(apply)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Start tracking an application for a catalog offer.
pub(crate) async fn apply_endpoint(
    State(portal): State<Portal>,
    Path(offer_id): Path<String>,
    request: Option<Json<ApplyRequest>>,
) -> Result<(StatusCode, Json<ApplicationView>), AppError> {
    let offer_id = OfferId(offer_id);
    let offer = portal
        .catalog
        .get(&offer_id)
        .ok_or_else(|| AppError::OfferNotFound(offer_id.clone()))?;

    let applied_on = request
        .and_then(|Json(request)| request.applied_on)
        .unwrap_or_else(|| Local::now().date_naive());

    let application = portal
        .tracker
        .submit(NewApplication::for_offer(offer, applied_on))?;
    info!(offer_id = %offer_id, application_id = %application.id(), "applied to offer");

    Ok((StatusCode::CREATED, Json(ApplicationView::from(application))))
}
