//! Event service - read-only catalogue of scheduled events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::EventSummary;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Every event, newest first, with its attendee count.
    async fn list_events(&self) -> AppResult<Vec<EventSummary>>;
}

/// Concrete implementation of EventService using Unit of Work.
pub struct EventCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EventCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for EventCatalog<U> {
    async fn list_events(&self) -> AppResult<Vec<EventSummary>> {
        let events = self.uow.events().list_summaries().await?;
        tracing::debug!(count = events.len(), "Listed events");
        Ok(events)
    }
}
