//! Verification service - password check followed by face match.
//!
//! Each stage gates the next:
//! `IdentityLookup -> PasswordCheck -> FaceExtraction -> FaceMatch -> Accepted`.
//! Any stage may reject; nothing is retried within one call. Attempt
//! throttling is the rate limiter's job, not this service's.

use async_trait::async_trait;
use std::sync::Arc;

use super::run_blocking;
use crate::biometrics::FaceExtractor;
use crate::config::FACE_MATCH_THRESHOLD;
use crate::domain::{normalize_email, Credentials, FaceTemplate, IdentitySummary, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Verification service trait for dependency injection.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Verify a login attempt and return the public identity fields.
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown email or wrong password,
    /// `FaceExtractionFailed` for an unusable image, `FaceMismatch` when the
    /// face is too far from the stored template, `CorruptTemplate` or
    /// `StoreUnavailable` for internal faults.
    async fn verify(&self, credentials: Credentials) -> AppResult<IdentitySummary>;
}

/// Concrete implementation of VerificationService using Unit of Work.
pub struct Verifier<U: UnitOfWork> {
    uow: Arc<U>,
    extractor: FaceExtractor,
}

impl<U: UnitOfWork> Verifier<U> {
    pub fn new(uow: Arc<U>, extractor: FaceExtractor) -> Self {
        Self { uow, extractor }
    }
}

#[async_trait]
impl<U: UnitOfWork> VerificationService for Verifier<U> {
    async fn verify(&self, credentials: Credentials) -> AppResult<IdentitySummary> {
        let Credentials {
            email,
            password,
            image,
        } = credentials;
        let email = normalize_email(&email);

        // Identity lookup
        let identity = self.uow.identities().find_by_email(&email).await?;

        // Password check; unknown emails still pay for one hash verification
        let identity = match identity {
            Some(identity) => {
                let stored = Password::from_hash(identity.password_hash.clone());
                let valid = run_blocking(move || Ok(stored.verify(&password))).await?;
                if !valid {
                    tracing::info!(identity_id = identity.id, "Login rejected: wrong password");
                    return Err(AppError::InvalidCredentials);
                }
                identity
            }
            None => {
                run_blocking(move || Ok(Password::verify_dummy(&password))).await?;
                tracing::info!("Login rejected: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        // Face extraction
        let candidate = self
            .extractor
            .extract_single(image)
            .await
            .map_err(AppError::into_extraction_failure)?;

        // Face match
        let enrolled = FaceTemplate::decode(&identity.face_template).map_err(|e| {
            tracing::error!(identity_id = identity.id, error = %e, "Stored template unreadable");
            e
        })?;

        let distance = enrolled.distance(&candidate);
        if distance > FACE_MATCH_THRESHOLD {
            tracing::info!(
                identity_id = identity.id,
                distance = distance,
                "Login rejected: face mismatch"
            );
            return Err(AppError::FaceMismatch);
        }

        tracing::info!(identity_id = identity.id, "Login accepted");
        Ok(identity.summary())
    }
}
