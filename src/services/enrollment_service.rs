//! Enrollment service - binds a new identity to exactly one face template.
//!
//! Order of work: extract the face, hash the password, then a single insert.
//! Neither CPU-heavy step runs while a store connection is checked out, and
//! a failure before the insert leaves the store untouched.

use async_trait::async_trait;
use std::sync::Arc;

use super::run_blocking;
use crate::biometrics::FaceExtractor;
use crate::domain::{normalize_email, Enrollment, Identity, NewIdentity, Password};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Enrollment service trait for dependency injection.
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Register a new identity.
    ///
    /// # Errors
    /// `InvalidImage`, `NoFaceDetected`, `MultipleFacesDetected`,
    /// `DuplicateIdentity` or `StoreUnavailable`.
    async fn enroll(&self, enrollment: Enrollment) -> AppResult<Identity>;
}

/// Concrete implementation of EnrollmentService using Unit of Work.
pub struct Enroller<U: UnitOfWork> {
    uow: Arc<U>,
    extractor: FaceExtractor,
}

impl<U: UnitOfWork> Enroller<U> {
    pub fn new(uow: Arc<U>, extractor: FaceExtractor) -> Self {
        Self { uow, extractor }
    }
}

#[async_trait]
impl<U: UnitOfWork> EnrollmentService for Enroller<U> {
    async fn enroll(&self, enrollment: Enrollment) -> AppResult<Identity> {
        let Enrollment {
            name,
            email,
            phone,
            password,
            image,
        } = enrollment;
        let email = normalize_email(&email);

        let template = self.extractor.extract_single(image).await.map_err(|e| {
            tracing::info!(email = %email, reason = %e, "Enrollment rejected");
            e
        })?;

        let password_hash = run_blocking(move || Password::new(&password))
            .await?
            .into_string();

        let identity = self
            .uow
            .identities()
            .create(NewIdentity {
                name: name.trim().to_string(),
                email,
                phone: phone.trim().to_string(),
                password_hash,
                face_template: template.encode(),
            })
            .await?;

        tracing::info!(identity_id = identity.id, "Identity enrolled");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    use chrono::Utc;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use mockall::predicate::function;

    use crate::biometrics::MockFaceEncoder;
    use crate::config::TEMPLATE_DIMENSIONS;
    use crate::domain::FaceTemplate;
    use crate::errors::AppError;
    use crate::infra::{EventRepository, IdentityRepository, MockEventRepository, MockIdentityRepository};

    struct TestUnitOfWork {
        identities: Arc<MockIdentityRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn identities(&self) -> Arc<dyn IdentityRepository> {
            self.identities.clone()
        }

        fn events(&self) -> Arc<dyn EventRepository> {
            Arc::new(MockEventRepository::new())
        }
    }

    fn png() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn encoder_returning(faces: usize) -> MockFaceEncoder {
        let mut encoder = MockFaceEncoder::new();
        encoder.expect_encode().returning(move |_| {
            Ok((0..faces)
                .map(|_| FaceTemplate::new(vec![0.1; TEMPLATE_DIMENSIONS]).unwrap())
                .collect())
        });
        encoder
    }

    fn enroller(repo: MockIdentityRepository, encoder: MockFaceEncoder) -> Enroller<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            identities: Arc::new(repo),
        };
        let extractor = FaceExtractor::new(Arc::new(encoder), Duration::from_secs(5));
        Enroller::new(Arc::new(uow), extractor)
    }

    fn enrollment(email: &str) -> Enrollment {
        Enrollment {
            name: "Alice".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            password: "Secret123".to_string(),
            image: png(),
        }
    }

    fn stored(new: NewIdentity) -> Identity {
        Identity {
            id: 1,
            name: new.name,
            email: new.email,
            phone: new.phone,
            password_hash: new.password_hash,
            face_template: new.face_template,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_enroll_persists_hashed_password_and_template() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_create()
            .with(function(|new: &NewIdentity| {
                new.email == "a@x.com"
                    && new.password_hash != "Secret123"
                    && Password::from_hash(new.password_hash.clone()).verify("Secret123")
                    && FaceTemplate::decode(&new.face_template).is_ok()
            }))
            .times(1)
            .returning(|new| Ok(stored(new)));

        let identity = enroller(repo, encoder_returning(1))
            .enroll(enrollment(" A@X.com "))
            .await
            .unwrap();

        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.name, "Alice");
    }

    #[tokio::test]
    async fn test_no_face_persists_nothing() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_create().times(0);

        let err = enroller(repo, encoder_returning(0))
            .enroll(enrollment("a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoFaceDetected));
    }

    #[tokio::test]
    async fn test_multiple_faces_persists_nothing() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_create().times(0);

        let err = enroller(repo, encoder_returning(2))
            .enroll(enrollment("a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MultipleFacesDetected));
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_from_store() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::DuplicateIdentity));

        let err = enroller(repo, encoder_returning(1))
            .enroll(enrollment("a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn test_undecodable_image_is_invalid_image() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_create().times(0);
        let mut encoder = MockFaceEncoder::new();
        encoder.expect_encode().times(0);

        let mut request = enrollment("a@x.com");
        request.image = b"not an image".to_vec();

        let err = enroller(repo, encoder).enroll(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidImage(_)));
    }
}
