use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventSummary, IdentitySummary};

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login: the message plus the public identity fields
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: IdentitySummary,
}

impl LoginResponse {
    pub fn new(user: IdentitySummary) -> Self {
        Self {
            message: "Login successful".to_string(),
            user,
        }
    }
}

/// Event listing
#[derive(Debug, Serialize, ToSchema)]
pub struct EventsResponse {
    pub events: Vec<EventSummary>,
}
