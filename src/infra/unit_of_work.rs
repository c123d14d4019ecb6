//! Unit of Work - single entry point to every repository.
//!
//! Services receive a `UnitOfWork` instead of individual repositories so the
//! whole credential store can be swapped for a fake in tests. Every repository
//! shares one connection pool; connections go back to the pool as soon as a
//! query finishes, including on error paths.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{EventRepository, EventStore, IdentityRepository, IdentityStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get identity repository
    fn identities(&self) -> Arc<dyn IdentityRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    identity_repo: Arc<IdentityStore>,
    event_repo: Arc<EventStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            identity_repo: Arc::new(IdentityStore::new(db.clone())),
            event_repo: Arc::new(EventStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        self.identity_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }
}
