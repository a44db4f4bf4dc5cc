use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Application, ApplicationId, ApplicationQuery, NewApplication, StatusCount};
use super::lifecycle::ApplicationAction;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationServiceError, ApplicationTracker};

/// Router builder exposing the tracker's list and transition endpoints.
pub fn application_router<R>(tracker: Arc<ApplicationTracker<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/v1/applications/:application_id", get(get_handler::<R>))
        .route(
            "/api/v1/applications/:application_id/accept",
            post(accept_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/confirm",
            post(confirm_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/decline",
            post(decline_handler::<R>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<R>))
        .with_state(tracker)
}

/// Application payload enriched with the actions a client may offer.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub status_label: &'static str,
    pub allowed_actions: Vec<ApplicationAction>,
}

impl From<Application> for ApplicationView {
    fn from(application: Application) -> Self {
        Self {
            status_label: application.status().display_name(),
            allowed_actions: application.allowed_actions(),
            application,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub responded_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub responded_on: NaiveDate,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeclineRequest {
    #[serde(default)]
    pub acknowledge_irreversible: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
}

pub(crate) async fn list_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let query = match ApplicationQuery::parse(
        params.status.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    ) {
        Ok(query) => query,
        Err(error) => return error_body(StatusCode::BAD_REQUEST, error.to_string()),
    };

    match tracker.list(&query) {
        Ok(applications) => {
            let views: Vec<ApplicationView> =
                applications.into_iter().map(ApplicationView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Json(submission): Json<NewApplication>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match tracker.submit(submission) {
        Ok(application) => {
            (StatusCode::CREATED, Json(ApplicationView::from(application))).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    view_response(tracker.get(&ApplicationId(application_id)))
}

pub(crate) async fn accept_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Path(application_id): Path<String>,
    Json(request): Json<AcceptRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    view_response(tracker.accept(&ApplicationId(application_id), request.responded_on))
}

pub(crate) async fn reject_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Path(application_id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    view_response(tracker.reject(
        &ApplicationId(application_id),
        request.responded_on,
        request.comment,
    ))
}

pub(crate) async fn confirm_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    view_response(tracker.confirm(&ApplicationId(application_id)))
}

pub(crate) async fn decline_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    Path(application_id): Path<String>,
    request: Option<Json<DeclineRequest>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let acknowledged = request
        .map(|Json(request)| request.acknowledge_irreversible)
        .unwrap_or(false);
    if let Err(error) = ApplicationAction::Decline.check_acknowledged(acknowledged) {
        return error_body(
            StatusCode::PRECONDITION_REQUIRED,
            format!("{error}; resend with acknowledge_irreversible set to true"),
        );
    }

    view_response(tracker.decline(&ApplicationId(application_id)))
}

pub(crate) async fn dashboard_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match tracker.status_counts() {
        Ok(by_status) => {
            let total = by_status.iter().map(|entry| entry.count).sum();
            (StatusCode::OK, Json(DashboardView { total, by_status })).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn view_response(result: Result<Application, ApplicationServiceError>) -> Response {
    match result {
        Ok(application) => (StatusCode::OK, Json(ApplicationView::from(application))).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) fn service_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationServiceError::InvalidTransition(_)
        | ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_body(status, error.to_string())
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}
