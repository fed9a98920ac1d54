use bytes::Bytes;
use validator::{Validate, ValidationError};

use crate::domain::recipe::validation::invalid;

pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/bmp"];

const IMAGE_PREFIX: &str = "images";

/// Image picked by the user, held in memory until the recipe is saved.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ImageUpload {
    #[validate(custom(function = "validate_file_name"))]
    pub file_name: String,

    #[validate(custom(function = "validate_content_type"))]
    pub content_type: String,

    #[validate(custom(function = "validate_image_bytes"))]
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Storage key. Uploads sharing a file name replace each other.
    pub fn object_key(&self) -> String {
        format!("{IMAGE_PREFIX}/{}", self.file_name)
    }
}

fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    if file_name.trim().is_empty() {
        return Err(invalid("file_name_required", "the image needs a file name"));
    }
    if file_name.contains('/') {
        return Err(invalid(
            "file_name_path",
            "the image file name must not contain '/'",
        ));
    }
    Ok(())
}

fn validate_content_type(content_type: &str) -> Result<(), ValidationError> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Ok(());
    }
    Err(invalid(
        "image_type",
        "only JPEG, PNG and BMP images can be uploaded",
    ))
}

fn validate_image_bytes(bytes: &Bytes) -> Result<(), ValidationError> {
    if bytes.is_empty() {
        return Err(invalid("image_empty", "the image file is empty"));
    }
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(invalid("image_too_large", "images must not exceed 5 MB"));
    }
    Ok(())
}
