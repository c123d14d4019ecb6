//! Event listing read model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One event with its aggregated attendee count.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Launch party")]
    pub title: String,
    pub description: Option<String>,
    /// Event day (`YYYY-MM-DD`)
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    #[schema(example = "Main hall")]
    pub location: String,
    /// Name of the identity that created the event
    #[schema(example = "Alice")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[schema(example = 12)]
    pub attendees: i64,
}
