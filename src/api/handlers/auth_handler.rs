//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{FromMultipart, MultipartFields, ValidatedMultipart};
use crate::api::AppState;
use crate::config::{
    FIELD_EMAIL, FIELD_FACE_IMAGE, FIELD_NAME, FIELD_PASSWORD, FIELD_PHONE,
};
use crate::domain::{Credentials, Enrollment};
use crate::errors::AppResult;
use crate::types::{LoginResponse, MessageResponse};

/// Registration form (multipart/form-data)
#[derive(Validate, ToSchema)]
pub struct RegisterForm {
    /// Display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Alice", max_length = 255)]
    pub name: String,
    /// Email address, unique per identity (case-insensitive)
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "a@x.com", max_length = 255)]
    pub email: String,
    /// Phone number
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    #[schema(example = "555-0100", max_length = 20)]
    pub phone: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "Secret123", min_length = 8)]
    pub password: String,
    /// Photo containing exactly one face
    #[schema(value_type = String, format = Binary)]
    pub face_image: Vec<u8>,
}

impl FromMultipart for RegisterForm {
    fn from_multipart(fields: &MultipartFields) -> Option<Self> {
        Some(Self {
            name: fields.text(FIELD_NAME)?,
            email: fields.text(FIELD_EMAIL)?.trim().to_string(),
            phone: fields.text(FIELD_PHONE)?,
            password: fields.text(FIELD_PASSWORD)?,
            face_image: fields.file(FIELD_FACE_IMAGE)?,
        })
    }
}

impl From<RegisterForm> for Enrollment {
    fn from(form: RegisterForm) -> Self {
        Enrollment {
            name: form.name,
            email: form.email,
            phone: form.phone,
            password: form.password,
            image: form.face_image,
        }
    }
}

/// Login form (multipart/form-data)
#[derive(Validate, ToSchema)]
pub struct LoginForm {
    /// Email address used at registration
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Password
    #[schema(example = "Secret123")]
    pub password: String,
    /// Fresh photo of the same person
    #[schema(value_type = String, format = Binary)]
    pub face_image: Vec<u8>,
}

impl FromMultipart for LoginForm {
    fn from_multipart(fields: &MultipartFields) -> Option<Self> {
        Some(Self {
            email: fields.text(FIELD_EMAIL)?.trim().to_string(),
            password: fields.text(FIELD_PASSWORD)?,
            face_image: fields.file(FIELD_FACE_IMAGE)?,
        })
    }
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Credentials {
            email: form.email,
            password: form.password,
            image: form.face_image,
        }
    }
}

/// Create registration and login routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new identity with a password and a face photo
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body(content = RegisterForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing field, validation error, unusable photo or duplicate email"),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Credential store unavailable")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedMultipart(form): ValidatedMultipart<RegisterForm>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.enrollment_service.enroll(form.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Log in with email, password and a face photo
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing field, validation error or unusable photo"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Credential store unavailable")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedMultipart(form): ValidatedMultipart<LoginForm>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.verification_service.verify(form.into()).await?;

    Ok(Json(LoginResponse::new(user)))
}
