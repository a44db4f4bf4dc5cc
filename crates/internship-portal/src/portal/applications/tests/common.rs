use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::portal::applications::domain::{Application, ApplicationId};
use crate::portal::applications::repository::{
    ApplicationRepository, InMemoryApplicationRepository, RepositoryError,
};
use crate::portal::applications::{application_router, ApplicationTracker};
use crate::portal::seed;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn id(raw: &str) -> ApplicationId {
    ApplicationId::new(raw)
}

/// Tracker over the five seeded applications (ids "1" through "5").
pub(super) fn seeded_tracker() -> (
    ApplicationTracker<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(seed::seeded_repository().expect("seed data loads"));
    (ApplicationTracker::new(repository.clone()), repository)
}

pub(super) fn tracker_with(
    applications: Vec<Application>,
) -> ApplicationTracker<InMemoryApplicationRepository> {
    let repository = InMemoryApplicationRepository::with_applications(applications)
        .expect("unique application ids");
    ApplicationTracker::new(Arc::new(repository))
}

pub(super) fn seeded_router() -> (axum::Router, Arc<InMemoryApplicationRepository>) {
    let (tracker, repository) = seeded_tracker();
    (application_router(Arc::new(tracker)), repository)
}

pub(super) fn assert_response_invariant(application: &Application) {
    use crate::portal::applications::ApplicationStatus;

    assert_eq!(
        application.response_date().is_some(),
        application.status() != ApplicationStatus::Awaiting,
        "response date must be present exactly when the company has answered ({application:?})"
    );
    if application.comment().is_some() {
        assert_eq!(application.status(), ApplicationStatus::Rejected);
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_if(
        &self,
        _expected: &Application,
        _next: Application,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Holds the first `callers` fetches at a barrier so concurrent transitions
/// all start from the same snapshot.
pub(super) struct GatedRepository {
    inner: InMemoryApplicationRepository,
    barrier: Barrier,
    callers: usize,
    fetches: AtomicUsize,
}

impl ApplicationRepository for GatedRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        self.inner.insert(application)
    }

    fn update_if(&self, expected: &Application, next: Application) -> Result<bool, RepositoryError> {
        self.inner.update_if(expected, next)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        if self.fetches.fetch_add(1, Ordering::SeqCst) < self.callers {
            self.barrier.wait();
        }
        self.inner.fetch(id)
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        self.inner.all()
    }
}

pub(super) fn gated_tracker(
    callers: usize,
) -> (ApplicationTracker<GatedRepository>, Arc<GatedRepository>) {
    let repository = Arc::new(GatedRepository {
        inner: seed::seeded_repository().expect("seed data loads"),
        barrier: Barrier::new(callers),
        callers,
        fetches: AtomicUsize::new(0),
    });
    (ApplicationTracker::new(repository.clone()), repository)
}
