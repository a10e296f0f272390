use std::fmt;

use bytes::Bytes;
use mime_guess::mime::{self, Mime};

use crate::validate::ValidationError;

/// A parsed, normalised MIME type such as `image/png`.
///
/// Parameters (`; charset=...`) are dropped. The subtype is restricted to a
/// filename-safe token because the filesystem backend turns it into a file
/// extension.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MediaType(String);

impl MediaType {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMediaType(raw.trim().to_string());

        let parsed: Mime = raw.trim().parse().map_err(|_| invalid())?;
        let essence = parsed.essence_str().to_ascii_lowercase();

        let (_, subtype) = essence.split_once('/').ok_or_else(invalid)?;
        if !is_safe_token(subtype) {
            return Err(invalid());
        }

        Ok(Self(essence))
    }

    /// Fallback used when a multipart part carries no `Content-Type`.
    pub fn octet_stream() -> Self {
        Self(mime::APPLICATION_OCTET_STREAM.essence_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Subtype portion of the type, used verbatim as the file extension
    /// (`image/png` -> `png`, `image/svg+xml` -> `svg+xml`).
    pub fn extension(&self) -> &str {
        self.0
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or(&self.0)
    }
}

fn is_safe_token(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('.')
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}

impl fmt::Debug for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaType({})", self.0)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file received in a single upload request.
#[derive(Clone, Debug)]
pub struct UploadedAsset {
    pub data: Bytes,
    pub media_type: MediaType,
}

impl UploadedAsset {
    pub fn new(data: impl Into<Bytes>, media_type: MediaType) -> Self {
        Self {
            data: data.into(),
            media_type,
        }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An asset held by a store that supports direct retrieval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAsset {
    pub data: Bytes,
    pub media_type: MediaType,
}

/// Opaque string a client dereferences to obtain stored bytes: either an
/// HTTP URL or a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
