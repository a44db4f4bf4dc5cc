use crate::config::ConfigError;
use crate::portal::applications::{ApplicationServiceError, ParseQueryError, RepositoryError};
use crate::portal::offers::{FilterError, OfferId};
use crate::portal::seed::SeedError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Seed(SeedError),
    Tracker(ApplicationServiceError),
    Query(ParseQueryError),
    Discovery(FilterError),
    OfferNotFound(OfferId),
    /// Irreversible action attempted without the user's explicit acknowledgement.
    Unconfirmed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Seed(err) => write!(f, "seed data error: {}", err),
            AppError::Tracker(err) => write!(f, "application error: {}", err),
            AppError::Query(err) => write!(f, "invalid application query: {}", err),
            AppError::Discovery(err) => write!(f, "offer search error: {}", err),
            AppError::OfferNotFound(id) => write!(f, "offer {} not found", id),
            AppError::Unconfirmed(message) => write!(f, "confirmation required: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Seed(err) => Some(err),
            AppError::Tracker(err) => Some(err),
            AppError::Query(err) => Some(err),
            AppError::Discovery(err) => Some(err),
            AppError::OfferNotFound(_) | AppError::Unconfirmed(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Discovery(_) | AppError::Query(_) => StatusCode::BAD_REQUEST,
            AppError::Unconfirmed(_) => StatusCode::PRECONDITION_REQUIRED,
            AppError::OfferNotFound(_)
            | AppError::Tracker(ApplicationServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Tracker(ApplicationServiceError::InvalidTransition(_))
            | AppError::Tracker(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Tracker(ApplicationServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Seed(_)
            | AppError::Tracker(ApplicationServiceError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SeedError> for AppError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<ApplicationServiceError> for AppError {
    fn from(value: ApplicationServiceError) -> Self {
        Self::Tracker(value)
    }
}

impl From<ParseQueryError> for AppError {
    fn from(value: ParseQueryError) -> Self {
        Self::Query(value)
    }
}

impl From<FilterError> for AppError {
    fn from(value: FilterError) -> Self {
        Self::Discovery(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::applications::{ApplicationAction, ApplicationId, ApplicationStatus, TransitionError};

    #[test]
    fn tracker_errors_map_to_http_statuses() {
        let not_found: AppError =
            ApplicationServiceError::NotFound(ApplicationId::new("9")).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: AppError = ApplicationServiceError::from(TransitionError {
            from: ApplicationStatus::Awaiting,
            action: ApplicationAction::Confirm,
        })
        .into();
        assert_eq!(invalid.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn discovery_errors_are_client_errors() {
        let error: AppError = FilterError::UnknownCategory("salary".to_string()).into();
        assert!(error.to_string().contains("salary"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unconfirmed_actions_require_precondition() {
        let missing = AppError::OfferNotFound(OfferId::new("42"));
        assert_eq!(missing.to_string(), "offer 42 not found");
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let error = AppError::Unconfirmed("decline 1".to_string());
        assert_eq!(
            error.into_response().status(),
            StatusCode::PRECONDITION_REQUIRED
        );
    }
}
