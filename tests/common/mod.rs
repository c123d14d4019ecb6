//! Shared fakes for integration tests: an in-memory credential store with a
//! real uniqueness check and a deterministic face encoder.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use face_auth_api::biometrics::{FaceEncoder, FaceExtractor};
use face_auth_api::config::TEMPLATE_DIMENSIONS;
use face_auth_api::domain::{EventSummary, FaceTemplate, Identity, NewIdentity};
use face_auth_api::errors::{AppError, AppResult};
use face_auth_api::infra::{EventRepository, IdentityRepository, UnitOfWork};
use face_auth_api::services::{Enroller, EventCatalog, Services, Verifier};

// =============================================================================
// In-memory credential store
// =============================================================================

#[derive(Default)]
pub struct InMemoryIdentities {
    rows: Mutex<Vec<Identity>>,
}

impl InMemoryIdentities {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<Identity> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentities {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.email == email).cloned())
    }

    async fn create(&self, identity: NewIdentity) -> AppResult<Identity> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.email == identity.email) {
            return Err(AppError::DuplicateIdentity);
        }

        let row = Identity {
            id: rows.len() as i32 + 1,
            name: identity.name,
            email: identity.email,
            phone: identity.phone,
            password_hash: identity.password_hash,
            face_template: identity.face_template,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}

#[derive(Default)]
pub struct InMemoryEvents {
    pub events: Vec<EventSummary>,
}

#[async_trait]
impl EventRepository for InMemoryEvents {
    async fn list_summaries(&self) -> AppResult<Vec<EventSummary>> {
        let mut events = self.events.clone();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub identities: Arc<InMemoryIdentities>,
    pub events: Arc<InMemoryEvents>,
}

impl UnitOfWork for InMemoryStore {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        self.identities.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.events.clone()
    }
}

// =============================================================================
// Deterministic face encoder
// =============================================================================

/// Reads the top-left pixel: red / 100 fills every template dimension and
/// green is the number of faces "detected".
#[derive(Default)]
pub struct StubEncoder {
    calls: AtomicUsize,
}

impl StubEncoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FaceEncoder for StubEncoder {
    fn encode(&self, image: &RgbImage) -> AppResult<Vec<FaceTemplate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Rgb([red, green, _]) = *image.get_pixel(0, 0);
        (0..green)
            .map(|_| FaceTemplate::new(vec![red as f64 / 100.0; TEMPLATE_DIMENSIONS]))
            .collect()
    }
}

/// PNG whose stub template is `red / 100` with `faces` faces in it.
pub fn face_png(red: u8, faces: u8) -> Vec<u8> {
    let image = RgbImage::from_pixel(4, 4, Rgb([red, faces, 0]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Alice's enrollment photo.
pub fn img_a1() -> Vec<u8> {
    face_png(10, 1)
}

/// Another photo of Alice, about 0.57 away from `img_a1`.
pub fn img_a2() -> Vec<u8> {
    face_png(15, 1)
}

/// Somebody else.
pub fn img_b() -> Vec<u8> {
    face_png(90, 1)
}

// =============================================================================
// Wiring
// =============================================================================

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub encoder: Arc<StubEncoder>,
    pub enroller: Enroller<InMemoryStore>,
    pub verifier: Verifier<InMemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_events(Vec::new())
    }

    pub fn with_events(events: Vec<EventSummary>) -> Self {
        let store = Arc::new(InMemoryStore {
            identities: Arc::new(InMemoryIdentities::default()),
            events: Arc::new(InMemoryEvents { events }),
        });
        let encoder = Arc::new(StubEncoder::default());
        let extractor = FaceExtractor::new(encoder.clone(), Duration::from_secs(5));

        Self {
            enroller: Enroller::new(store.clone(), extractor.clone()),
            verifier: Verifier::new(store.clone(), extractor),
            store,
            encoder,
        }
    }

    /// Service container over the same store and encoder.
    pub fn services(&self) -> Services {
        let extractor = FaceExtractor::new(self.encoder.clone(), Duration::from_secs(5));
        Services::new(
            Arc::new(Enroller::new(self.store.clone(), extractor.clone())),
            Arc::new(Verifier::new(self.store.clone(), extractor)),
            Arc::new(EventCatalog::new(self.store.clone())),
        )
    }
}
