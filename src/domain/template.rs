//! Face template value object and its stored text format.
//!
//! Version 1 text is `ft1:` followed by standard base64 of the template's
//! 128 values as little-endian IEEE-754 doubles. Unprefixed base64 holding
//! exactly 1024 bytes is read as a legacy row with the same byte layout.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::{TEMPLATE_DIMENSIONS, TEMPLATE_FORMAT_V1_PREFIX};
use crate::errors::{AppError, AppResult};

const VALUE_WIDTH: usize = std::mem::size_of::<f64>();
const ENCODED_LEN: usize = TEMPLATE_DIMENSIONS * VALUE_WIDTH;

/// Fixed-length biometric vector describing one face.
#[derive(Clone, PartialEq)]
pub struct FaceTemplate {
    values: Vec<f64>,
}

// Templates are biometric data; keep them out of logs.
impl std::fmt::Debug for FaceTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceTemplate")
            .field("dimensions", &self.values.len())
            .finish()
    }
}

impl FaceTemplate {
    /// Wrap encoder output, enforcing the fixed dimensionality.
    pub fn new(values: Vec<f64>) -> AppResult<Self> {
        if values.len() != TEMPLATE_DIMENSIONS {
            return Err(AppError::internal(format!(
                "face encoder produced {} values, expected {}",
                values.len(),
                TEMPLATE_DIMENSIONS
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::internal("face encoder produced non-finite values"));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean distance to another template; lower means more similar.
    pub fn distance(&self, other: &FaceTemplate) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Serialize to the current stored text format.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(ENCODED_LEN);
        for value in &self.values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        format!("{}{}", TEMPLATE_FORMAT_V1_PREFIX, STANDARD.encode(bytes))
    }

    /// Parse stored text back into a template.
    ///
    /// # Errors
    /// Any unknown version, bad base64, wrong length or non-finite value is
    /// `CorruptTemplate`.
    pub fn decode(stored: &str) -> AppResult<Self> {
        let payload = match stored.strip_prefix(TEMPLATE_FORMAT_V1_PREFIX) {
            Some(payload) => payload,
            None if looks_versioned(stored) => {
                return Err(AppError::corrupt_template(format!(
                    "unsupported template format version '{}'",
                    stored.split(':').next().unwrap_or_default()
                )));
            }
            None => stored,
        };

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::corrupt_template(format!("invalid base64: {}", e)))?;

        if bytes.len() != ENCODED_LEN {
            return Err(AppError::corrupt_template(format!(
                "expected {} bytes, found {}",
                ENCODED_LEN,
                bytes.len()
            )));
        }

        let values: Vec<f64> = bytes
            .chunks_exact(VALUE_WIDTH)
            .map(|chunk| {
                let mut raw = [0u8; VALUE_WIDTH];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            })
            .collect();

        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::corrupt_template("template contains non-finite values"));
        }

        Ok(Self { values })
    }
}

/// Versioned payloads carry a short `name:` tag; base64 never contains ':'.
fn looks_versioned(stored: &str) -> bool {
    stored.contains(':')
}
