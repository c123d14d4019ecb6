//! Event repository - read-only listing with attendee counts.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::domain::EventSummary;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

const LIST_EVENTS_SQL: &str = r#"
    SELECT e.id, e.title, e.description, e.event_date, e.location,
           u.name AS created_by, e.created_at,
           COUNT(er.id) AS attendees
    FROM events e
    LEFT JOIN users u ON e.created_by = u.id
    LEFT JOIN event_registrations er ON e.id = er.event_id
    GROUP BY e.id, u.name
    ORDER BY e.event_date DESC
"#;

/// Event repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, newest `event_date` first, with registration counts.
    async fn list_summaries(&self) -> AppResult<Vec<EventSummary>>;
}

#[derive(Debug, FromQueryResult)]
struct EventSummaryRow {
    id: i32,
    title: String,
    description: Option<String>,
    event_date: NaiveDate,
    location: String,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
    attendees: Option<i64>,
}

impl From<EventSummaryRow> for EventSummary {
    fn from(row: EventSummaryRow) -> Self {
        EventSummary {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.event_date,
            location: row.location,
            created_by: row.created_by,
            created_at: row.created_at,
            attendees: row.attendees.unwrap_or(0),
        }
    }
}

/// SeaORM-backed event repository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn list_summaries(&self) -> AppResult<Vec<EventSummary>> {
        let rows = EventSummaryRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            LIST_EVENTS_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(EventSummary::from).collect())
    }
}
