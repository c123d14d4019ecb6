//! dlib ResNet face encoder backend (`dlib` feature).

use std::path::PathBuf;
use std::sync::Mutex;

use dlib_face_recognition::{
    FaceDetector, FaceDetectorTrait, FaceEncoderNetwork, FaceEncoderTrait, ImageMatrix,
    LandmarkPredictor, LandmarkPredictorTrait,
};
use image::RgbImage;
use tracing::debug;

use super::FaceEncoder;
use crate::config::{Config, ENCODER_MODEL_ENV, LANDMARK_MODEL_ENV};
use crate::domain::FaceTemplate;
use crate::errors::{AppError, AppResult};

struct DlibModels {
    detector: FaceDetector,
    predictor: LandmarkPredictor,
    encoder: FaceEncoderNetwork,
}

/// HOG face detector + 68-point landmarks + 128-d ResNet encoder.
///
/// dlib's networks are not safe for concurrent use, so calls are serialized.
pub struct DlibFaceEncoder {
    models: Mutex<DlibModels>,
    jitters: u32,
}

impl DlibFaceEncoder {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let landmark = require_model(config.landmark_model.clone(), "landmark predictor", LANDMARK_MODEL_ENV)?;
        let encoder = require_model(config.encoder_model.clone(), "face encoder", ENCODER_MODEL_ENV)?;

        debug!(path = %landmark.display(), "Loading landmark model");
        let predictor = LandmarkPredictor::open(&landmark).map_err(|message| {
            AppError::internal(format!("failed to load {}: {}", landmark.display(), message))
        })?;

        debug!(path = %encoder.display(), "Loading encoder model");
        let network = FaceEncoderNetwork::open(&encoder).map_err(|message| {
            AppError::internal(format!("failed to load {}: {}", encoder.display(), message))
        })?;

        tracing::info!("dlib face encoder ready");

        Ok(Self {
            models: Mutex::new(DlibModels {
                detector: FaceDetector::new(),
                predictor,
                encoder: network,
            }),
            jitters: config.encoder_jitters,
        })
    }
}

fn require_model(path: Option<PathBuf>, kind: &str, env: &str) -> AppResult<PathBuf> {
    path.ok_or_else(|| AppError::internal(format!("missing {} model; set ${}", kind, env)))
}

impl FaceEncoder for DlibFaceEncoder {
    fn encode(&self, image: &RgbImage) -> AppResult<Vec<FaceTemplate>> {
        let models = self
            .models
            .lock()
            .map_err(|_| AppError::internal("face encoder lock poisoned"))?;

        let matrix = ImageMatrix::from_image(image);
        let locations = models.detector.face_locations(&matrix);

        let mut landmarks = Vec::with_capacity(locations.len());
        for rect in locations.iter() {
            landmarks.push(models.predictor.face_landmarks(&matrix, rect));
        }

        let encodings = models
            .encoder
            .get_face_encodings(&matrix, &landmarks, self.jitters);

        encodings
            .iter()
            .map(|encoding| FaceTemplate::new(encoding.as_ref().to_vec()))
            .collect()
    }
}
