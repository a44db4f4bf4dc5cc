//! Student application tracking: status lifecycle, storage, and list projections.

pub mod domain;
pub mod lifecycle;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationQuery, ApplicationStatus, NewApplication,
    ParseQueryError, SortKey, SortOrder, StatusCount,
};
pub use lifecycle::{AcknowledgementRequired, ApplicationAction, Transition, TransitionError};
pub use repository::{ApplicationRepository, InMemoryApplicationRepository, RepositoryError};
pub use router::{application_router, ApplicationView};
pub use service::{ApplicationServiceError, ApplicationTracker};
