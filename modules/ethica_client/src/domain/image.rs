//! Profile picture intake: size and type checks, then inline `data:` URL encoding.

use std::path::Path;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::error::DomainError;

/// A picked file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Declared MIME type; empty when unknown.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image file {}", path.display()))?;
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Ok(Self { mime, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Size is checked before type.
pub fn validate_image(upload: &ImageUpload, max_bytes: u64) -> Result<(), DomainError> {
    if upload.size() > max_bytes {
        return Err(DomainError::image_too_large(upload.size(), max_bytes));
    }
    if !upload.mime.starts_with("image/") {
        return Err(DomainError::not_an_image(upload.mime.clone()));
    }
    Ok(())
}

pub fn to_data_url(upload: &ImageUpload) -> String {
    format!("data:{};base64,{}", upload.mime, STANDARD.encode(&upload.bytes))
}
