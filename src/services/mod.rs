//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod enrollment_service;
mod event_service;
mod verification_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use enrollment_service::{EnrollmentService, Enroller};
pub use event_service::{EventCatalog, EventService};
pub use verification_service::{VerificationService, Verifier};

#[cfg(test)]
pub use container::MockServiceContainer;

use crate::errors::{AppError, AppResult};

/// Run CPU-bound work (password hashing) on the blocking pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {}", e)))?
}
