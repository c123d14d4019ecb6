//! Custom request extractors.

mod validated_multipart;

pub use validated_multipart::{FromMultipart, MultipartFields, ValidatedMultipart};
