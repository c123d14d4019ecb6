//! Shared response bodies.

mod response;

pub use response::{EventsResponse, LoginResponse, MessageResponse};
