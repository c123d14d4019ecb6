//! Event listing handler.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::EventsResponse;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}

/// List all events, newest first, with attendee counts
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    responses(
        (status = 200, description = "Event list", body = EventsResponse),
        (status = 500, description = "Credential store unavailable")
    )
)]
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<EventsResponse>> {
    let events = state.event_service.list_events().await?;
    Ok(Json(EventsResponse { events }))
}
