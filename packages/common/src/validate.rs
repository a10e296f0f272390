use thiserror::Error;

use crate::asset::{MediaType, UploadedAsset};

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no file uploaded")]
    NoFile,

    #[error("file too large ({actual} > {limit} bytes)")]
    TooLarge { actual: u64, limit: u64 },

    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("media type not allowed: {0}")]
    MediaTypeNotAllowed(String),
}

/// Upload constraints checked before anything reaches a store.
#[derive(Clone, Debug)]
pub struct AssetValidator {
    max_size: u64,
    /// Empty means every well-formed media type is accepted.
    allowed_media_types: Vec<MediaType>,
}

impl Default for AssetValidator {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_SIZE)
    }
}

impl AssetValidator {
    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            allowed_media_types: Vec::new(),
        }
    }

    pub fn with_allowed_media_types(mut self, allowed: Vec<MediaType>) -> Self {
        self.allowed_media_types = allowed;
        self
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Size check on its own, so callers reading a body incrementally can
    /// bail out before buffering past the ceiling.
    pub fn check_size(&self, len: u64) -> Result<(), ValidationError> {
        if len > self.max_size {
            return Err(ValidationError::TooLarge {
                actual: len,
                limit: self.max_size,
            });
        }
        Ok(())
    }

    pub fn validate(&self, asset: Option<&UploadedAsset>) -> Result<(), ValidationError> {
        let asset = asset.ok_or(ValidationError::NoFile)?;

        self.check_size(asset.len())?;

        if !self.allowed_media_types.is_empty()
            && !self.allowed_media_types.contains(&asset.media_type)
        {
            return Err(ValidationError::MediaTypeNotAllowed(
                asset.media_type.to_string(),
            ));
        }

        Ok(())
    }
}
