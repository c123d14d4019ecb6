//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::biometrics::FaceExtractor;
use crate::infra::{Cache, Database};
use crate::services::{EnrollmentService, EventService, ServiceContainer, Services, VerificationService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Enrollment service
    pub enrollment_service: Arc<dyn EnrollmentService>,
    /// Verification service
    pub verification_service: Arc<dyn VerificationService>,
    /// Event service
    pub event_service: Arc<dyn EventService>,
    /// Database handle, used by the readiness probe
    pub database: Option<Arc<Database>>,
    /// Redis cache; rate limiting is off without one
    pub cache: Option<Arc<Cache>>,
    /// Rate-limit on proxy headers rather than the peer address
    pub trust_proxy_headers: bool,
}

impl AppState {
    /// Create application state backed by the database and a face extractor.
    pub fn from_config(database: Arc<Database>, extractor: FaceExtractor) -> Self {
        let container = Services::from_connection(database.get_connection(), extractor);
        Self::from_container(&container).with_database(database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer) -> Self {
        Self::new(
            container.enrollment(),
            container.verification(),
            container.events(),
        )
    }

    /// Create new application state with manually injected services.
    pub fn new(
        enrollment_service: Arc<dyn EnrollmentService>,
        verification_service: Arc<dyn VerificationService>,
        event_service: Arc<dyn EventService>,
    ) -> Self {
        Self {
            enrollment_service,
            verification_service,
            event_service,
            database: None,
            cache: None,
            trust_proxy_headers: false,
        }
    }

    /// Attach the database used by the readiness probe.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }

    /// Attach a Redis cache, enabling rate limiting on registration and login.
    pub fn with_cache(mut self, cache: Arc<Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Only enable behind a reverse proxy that overwrites `X-Forwarded-For`.
    pub fn with_trusted_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }
}
