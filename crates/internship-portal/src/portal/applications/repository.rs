use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Application, ApplicationId};

/// Storage abstraction so the tracker can be exercised in isolation.
///
/// `all` returns records in insertion order; list projections rely on it for
/// stable tie-breaking.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    /// Replace the stored record with `next` only if it still equals `expected`.
    ///
    /// Returns `Ok(false)` when another writer got there first. The comparison
    /// and the write happen atomically.
    fn update_if(&self, expected: &Application, next: Application) -> Result<bool, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn all(&self) -> Result<Vec<Application>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store; contents vanish on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<Application>>>,
}

impl InMemoryApplicationRepository {
    pub fn with_applications(applications: Vec<Application>) -> Result<Self, RepositoryError> {
        let repository = Self::default();
        for application in applications {
            repository.insert(application)?;
        }
        Ok(repository)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Application>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application store lock poisoned".into()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|stored| stored.id() == application.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn update_if(&self, expected: &Application, next: Application) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|stored| stored.id() == expected.id())
            .ok_or(RepositoryError::NotFound)?;
        if slot != expected {
            return Ok(false);
        }
        *slot = next;
        Ok(true)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|stored| stored.id() == id).cloned())
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        Ok(self.lock()?.clone())
    }
}
