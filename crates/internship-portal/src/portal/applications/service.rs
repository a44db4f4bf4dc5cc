use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationId, ApplicationQuery, ApplicationStatus, NewApplication, SortOrder,
    StatusCount,
};
use super::lifecycle::{Transition, TransitionError};
use super::repository::{ApplicationRepository, RepositoryError};

/// Owner of the student's applications and the only path that mutates them.
pub struct ApplicationTracker<R> {
    repository: Arc<R>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R> ApplicationTracker<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new application in the `awaiting` state.
    pub fn submit(
        &self,
        submission: NewApplication,
    ) -> Result<Application, ApplicationServiceError> {
        let NewApplication {
            company,
            position,
            applied_on,
        } = submission;

        if company.trim().is_empty() {
            return Err(ApplicationServiceError::Validation(
                "company must not be blank".to_string(),
            ));
        }
        if position.trim().is_empty() {
            return Err(ApplicationServiceError::Validation(
                "position must not be blank".to_string(),
            ));
        }

        let application = Application::new(
            next_application_id(),
            company.trim(),
            position.trim(),
            applied_on,
        );
        let stored = self.repository.insert(application)?;
        info!(application_id = %stored.id(), company = stored.company(), "application submitted");
        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ApplicationServiceError::NotFound(id.clone()))
    }

    /// Filtered and sorted view recomputed from the store on every call.
    ///
    /// Records lacking the sort field order as the earliest value. The sort is
    /// stable, so ties keep their insertion order in either direction.
    pub fn list(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<Application>, ApplicationServiceError> {
        let mut applications: Vec<Application> = self
            .repository
            .all()?
            .into_iter()
            .filter(|application| {
                query
                    .status
                    .map_or(true, |status| application.status() == status)
            })
            .collect();

        let key = query.sort_key;
        applications.sort_by(|a, b| {
            let ordering = key.extract(a).cmp(&key.extract(b));
            match query.sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        Ok(applications)
    }

    pub fn status_counts(&self) -> Result<Vec<StatusCount>, ApplicationServiceError> {
        let applications = self.repository.all()?;
        Ok(ApplicationStatus::ordered()
            .into_iter()
            .map(|status| StatusCount {
                status,
                label: status.display_name(),
                count: applications
                    .iter()
                    .filter(|application| application.status() == status)
                    .count(),
            })
            .collect())
    }

    pub fn accept(
        &self,
        id: &ApplicationId,
        responded_on: NaiveDate,
    ) -> Result<Application, ApplicationServiceError> {
        self.transition(id, Transition::Accept { responded_on })
    }

    pub fn reject(
        &self,
        id: &ApplicationId,
        responded_on: NaiveDate,
        comment: Option<String>,
    ) -> Result<Application, ApplicationServiceError> {
        self.transition(
            id,
            Transition::Reject {
                responded_on,
                comment,
            },
        )
    }

    /// Student takes an accepted internship.
    pub fn confirm(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.transition(id, Transition::Confirm)
    }

    /// Student withdraws from an accepted internship.
    ///
    /// Declining cannot be undone. The core does not ask for confirmation;
    /// callers must obtain an explicit acknowledgement from the user before
    /// invoking this.
    pub fn decline(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.transition(id, Transition::Decline)
    }

    /// Apply `transition` against the latest stored snapshot.
    ///
    /// The write is a compare-and-swap; when a concurrent transition wins, the
    /// record is re-read and the table consulted again, so two racing terminal
    /// actions cannot both succeed.
    fn transition(
        &self,
        id: &ApplicationId,
        transition: Transition,
    ) -> Result<Application, ApplicationServiceError> {
        let action = transition.action();

        loop {
            let current = self.get(id)?;

            if let Some(responded_on) = transition.responded_on() {
                if responded_on < current.application_date() {
                    warn!(application_id = %id, %action, %responded_on, "response predates application");
                    return Err(ApplicationServiceError::Validation(format!(
                        "response date {responded_on} is before application date {}",
                        current.application_date()
                    )));
                }
            }

            let next = current.apply(transition.clone()).map_err(|error| {
                warn!(application_id = %id, %action, from = %error.from, "transition refused");
                error
            })?;

            if !self.repository.update_if(&current, next.clone())? {
                debug!(application_id = %id, %action, "concurrent update detected, retrying");
                continue;
            }

            info!(
                application_id = %id,
                %action,
                from = %current.status(),
                to = %next.status(),
                "application transitioned"
            );
            return Ok(next);
        }
    }
}

/// Error raised by the application tracker.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("invalid application: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
