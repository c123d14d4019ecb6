//! Identity domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Registered user: profile, credentials and face template.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Stored template text, see [`FaceTemplate::encode`](super::FaceTemplate::encode).
    #[serde(skip_serializing)]
    pub face_template: String,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Public view of this identity.
    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Row to insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub face_template: String,
}

/// Identity fields safe to return after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IdentitySummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Enrollment input after form validation.
#[derive(Clone)]
pub struct Enrollment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub image: Vec<u8>,
}

/// Login attempt after form validation.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub image: Vec<u8>,
}

// Keep plaintext passwords and raw images out of logs.
impl std::fmt::Debug for Enrollment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enrollment")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("image_bytes", &self.image.len())
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("image_bytes", &self.image.len())
            .finish()
    }
}

/// Canonical form of the login key: trimmed and lowercased.
///
/// Applied before both insert and lookup so the store's unique index
/// treats `A@x.com` and `a@x.com` as the same identity.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: 7,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            phone: "555-0100".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            face_template: "ft1:AAAA".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_serialized_identity_excludes_secrets() {
        let json = serde_json::to_value(identity()).unwrap();

        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("face_template").is_none());
    }

    #[test]
    fn test_summary_fields() {
        let summary = identity().summary();
        assert_eq!(
            summary,
            IdentitySummary {
                id: 7,
                name: "Alice".to_string(),
                email: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials {
            email: "a@x.com".to_string(),
            password: "Secret123".to_string(),
            image: vec![1, 2, 3],
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("Secret123"));
        assert!(rendered.contains("image_bytes: 3"));
    }
}
