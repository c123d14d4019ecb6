//! Domain layer - Core business entities and logic
//!
//! Identities, their password hashes and face templates, plus the
//! read-only event model. No infrastructure concerns live here.

pub mod event;
pub mod identity;
pub mod password;
pub mod template;

pub use event::EventSummary;
pub use identity::{normalize_email, Credentials, Enrollment, Identity, IdentitySummary, NewIdentity};
pub use password::Password;
pub use template::FaceTemplate;
