//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through one `ServiceContainer`, which keeps
//! the HTTP layer testable with a mocked container.

use std::sync::Arc;

use super::{EnrollmentService, EventService, VerificationService};
use crate::biometrics::FaceExtractor;
use crate::infra::Persistence;

#[cfg(test)]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get enrollment service
    fn enrollment(&self) -> Arc<dyn EnrollmentService>;

    /// Get verification service
    fn verification(&self) -> Arc<dyn VerificationService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    enrollment_service: Arc<dyn EnrollmentService>,
    verification_service: Arc<dyn VerificationService>,
    event_service: Arc<dyn EventService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        enrollment_service: Arc<dyn EnrollmentService>,
        verification_service: Arc<dyn VerificationService>,
        event_service: Arc<dyn EventService>,
    ) -> Self {
        Self {
            enrollment_service,
            verification_service,
            event_service,
        }
    }

    /// Create service container from a database connection and face extractor
    pub fn from_connection(db: sea_orm::DatabaseConnection, extractor: FaceExtractor) -> Self {
        use super::{Enroller, EventCatalog, Verifier};

        let uow = Arc::new(Persistence::new(db));
        Self {
            enrollment_service: Arc::new(Enroller::new(uow.clone(), extractor.clone())),
            verification_service: Arc::new(Verifier::new(uow.clone(), extractor)),
            event_service: Arc::new(EventCatalog::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn enrollment(&self) -> Arc<dyn EnrollmentService> {
        self.enrollment_service.clone()
    }

    fn verification(&self) -> Arc<dyn VerificationService> {
        self.verification_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }
}
