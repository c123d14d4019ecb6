//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection pool, migrations and repositories (credential store)
//! - Redis counters for rate limiting
//! - Unit of Work bundling the repositories for the services

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{EventRepository, EventStore, IdentityRepository, IdentityStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use repositories::{MockEventRepository, MockIdentityRepository};
