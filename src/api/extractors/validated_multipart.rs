//! Validated multipart extractor - Combines form parsing with validation.
//!
//! Every field of the form is required: a missing or blank field rejects the
//! request with `BadRequest("All fields are required")` before validation runs,
//! and validation runs before any handler work.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};
use std::collections::HashMap;
use validator::Validate;

use crate::errors::AppError;

const MISSING_FIELDS: &str = "All fields are required";

/// Raw multipart parts keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartFields {
    parts: HashMap<String, Bytes>,
}

impl MultipartFields {
    pub fn insert(&mut self, name: impl Into<String>, data: Bytes) {
        self.parts.insert(name.into(), data);
    }

    /// Non-blank UTF-8 text field. The value is returned untrimmed.
    pub fn text(&self, name: &str) -> Option<String> {
        let data = self.parts.get(name)?;
        let value = std::str::from_utf8(data).ok()?;
        if value.trim().is_empty() {
            return None;
        }
        Some(value.to_string())
    }

    /// Non-empty file field.
    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.parts
            .get(name)
            .filter(|data| !data.is_empty())
            .map(|data| data.to_vec())
    }
}

/// Build a typed form from multipart parts; `None` when a field is missing.
pub trait FromMultipart: Sized {
    fn from_multipart(fields: &MultipartFields) -> Option<Self>;
}

/// Validated multipart extractor.
///
/// # Example
///
/// ```rust,ignore
/// async fn register(ValidatedMultipart(form): ValidatedMultipart<RegisterForm>) {
///     // every field is present and the form is already validated
/// }
/// ```
pub struct ValidatedMultipart<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedMultipart<T>
where
    S: Send + Sync,
    T: FromMultipart + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let mut fields = MultipartFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            fields.insert(name, data);
        }

        let value = T::from_multipart(&fields).ok_or_else(|| AppError::bad_request(MISSING_FIELDS))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedMultipart(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
