//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request validation
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    // Biometrics
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("No face detected in the image")]
    NoFaceDetected,

    #[error("Multiple faces detected. Please upload an image with only one face")]
    MultipleFacesDetected,

    #[error("Face extraction failed: {0}")]
    FaceExtractionFailed(String),

    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password was correct but the face did not match the stored template.
    #[error("Face verification failed")]
    FaceMismatch,

    // Credential store
    #[error("Email already exists")]
    DuplicateIdentity,

    #[error("Stored face template is corrupt: {0}")]
    CorruptTemplate(String),

    #[error("Credential store unavailable")]
    StoreUnavailable(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client.
    ///
    /// `FaceMismatch` shares the credentials code so callers cannot tell a
    /// wrong face from a wrong password.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidImage(_) => "INVALID_IMAGE",
            AppError::NoFaceDetected => "NO_FACE_DETECTED",
            AppError::MultipleFacesDetected => "MULTIPLE_FACES_DETECTED",
            AppError::FaceExtractionFailed(_) => "FACE_EXTRACTION_FAILED",
            AppError::InvalidCredentials | AppError::FaceMismatch => "INVALID_CREDENTIALS",
            AppError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::CorruptTemplate(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::InvalidImage(_)
            | AppError::NoFaceDetected
            | AppError::MultipleFacesDetected
            | AppError::FaceExtractionFailed(_)
            | AppError::DuplicateIdentity => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::FaceMismatch => StatusCode::UNAUTHORIZED,
            AppError::CorruptTemplate(_) | AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::BadRequest(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::InvalidImage(msg) => format!("Error processing image: {}", msg),
            AppError::FaceExtractionFailed(reason) => reason.clone(),
            AppError::FaceMismatch => AppError::InvalidCredentials.to_string(),

            // Hide details for internal errors
            AppError::StoreUnavailable(e) => {
                tracing::error!("Credential store error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::CorruptTemplate(msg) => {
                tracing::error!("Corrupt face template: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn corrupt_template(msg: impl Into<String>) -> Self {
        AppError::CorruptTemplate(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Re-classify an image-level failure raised during verification.
    ///
    /// Zero faces, several faces and undecodable images are all client
    /// correctable at login, so they collapse into `FaceExtractionFailed`
    /// while keeping the specific reason.
    pub fn into_extraction_failure(self) -> Self {
        match self {
            AppError::NoFaceDetected | AppError::MultipleFacesDetected => {
                AppError::FaceExtractionFailed(self.to_string())
            }
            AppError::InvalidImage(msg) => {
                AppError::FaceExtractionFailed(format!("Error processing image: {}", msg))
            }
            other => other,
        }
    }
}
