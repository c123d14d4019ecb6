//! Biometric extraction - turns uploaded images into face templates.
//!
//! The feature-extraction algorithm itself sits behind [`FaceEncoder`].
//! [`FaceExtractor`] owns the parts every backend shares: decoding to RGB,
//! running the encoder off the async runtime, and bounding it with a timeout.

#[cfg(feature = "dlib")]
mod dlib;

use std::sync::Arc;
use std::time::Duration;

use image::RgbImage;
use tokio::sync::Semaphore;

#[cfg(test)]
use mockall::automock;

use crate::config::Config;
use crate::domain::FaceTemplate;
use crate::errors::{AppError, AppResult};

#[cfg(feature = "dlib")]
pub use dlib::DlibFaceEncoder;

/// Face encoder backend: one template per detected face.
#[cfg_attr(test, automock)]
pub trait FaceEncoder: Send + Sync {
    fn encode(&self, image: &RgbImage) -> AppResult<Vec<FaceTemplate>>;
}

/// Decode raw upload bytes into a 3-channel image.
pub fn decode_image(bytes: &[u8]) -> AppResult<RgbImage> {
    let image = image::load_from_memory(bytes).map_err(|e| AppError::InvalidImage(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// Shared extraction pipeline used by enrollment and verification.
///
/// One extraction runs at a time. Callers queue on an async permit, so a
/// caller whose timeout expires while queued never occupies a blocking thread.
/// An extraction that has already started runs to completion after its caller
/// times out and keeps the permit until then.
#[derive(Clone)]
pub struct FaceExtractor {
    encoder: Arc<dyn FaceEncoder>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl FaceExtractor {
    pub fn new(encoder: Arc<dyn FaceEncoder>, timeout: Duration) -> Self {
        Self {
            encoder,
            timeout,
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Decode `image` and return every face template found in it.
    ///
    /// Decoding and encoding run on the blocking pool. Waiting for a permit
    /// counts against the timeout; a timeout is reported as
    /// `FaceExtractionFailed`.
    pub async fn extract(&self, image: Vec<u8>) -> AppResult<Vec<FaceTemplate>> {
        let encoder = Arc::clone(&self.encoder);
        let permits = Arc::clone(&self.permits);

        let job = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|_| AppError::internal("Face extractor closed"))?;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let rgb = decode_image(&image)?;
                tracing::debug!(width = rgb.width(), height = rgb.height(), "Decoded face image");
                encoder.encode(&rgb)
            })
            .await
            .map_err(|join_err| {
                AppError::internal(format!("Face extraction task failed: {}", join_err))
            })?
        };

        match tokio::time::timeout(self.timeout, job).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Face extraction timed out");
                Err(AppError::FaceExtractionFailed(
                    "Face extraction timed out".to_string(),
                ))
            }
        }
    }

    /// Extract exactly one face template.
    ///
    /// # Errors
    /// `NoFaceDetected` for zero faces, `MultipleFacesDetected` for more than one.
    pub async fn extract_single(&self, image: Vec<u8>) -> AppResult<FaceTemplate> {
        let mut faces = self.extract(image).await?;
        tracing::debug!(faces = faces.len(), "Face extraction finished");

        match faces.len() {
            0 => Err(AppError::NoFaceDetected),
            1 => Ok(faces.remove(0)),
            _ => Err(AppError::MultipleFacesDetected),
        }
    }
}

/// Build the encoder backend selected at compile time.
#[cfg(feature = "dlib")]
pub fn build_encoder(config: &Config) -> AppResult<Arc<dyn FaceEncoder>> {
    Ok(Arc::new(DlibFaceEncoder::from_config(config)?))
}

/// Build the encoder backend selected at compile time.
#[cfg(not(feature = "dlib"))]
pub fn build_encoder(_config: &Config) -> AppResult<Arc<dyn FaceEncoder>> {
    Err(AppError::internal(
        "no face encoder backend compiled in; rebuild with `--features dlib`",
    ))
}
