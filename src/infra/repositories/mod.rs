//! Repository layer - Data access abstraction
//!
//! Repositories hide SeaORM behind traits so services can be tested
//! against mocks or in-memory fakes.

pub(crate) mod entities;
mod event_repository;
mod identity_repository;

pub use event_repository::{EventRepository, EventStore};
pub use identity_repository::{IdentityRepository, IdentityStore};

// Export mocks for tests (both unit and integration)
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use identity_repository::MockIdentityRepository;
