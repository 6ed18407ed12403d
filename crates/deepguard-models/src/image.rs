//! Image files and selections.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media type prefix every accepted upload must carry.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// Returns true if the declared media type denotes an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_PREFIX)
}

/// A file-like object offered for classification.
///
/// The bytes are shared so that an in-flight request can hold its own
/// copy of the selection without duplicating the payload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    file_name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl ImageFile {
    /// Create a file from its name, declared media type and contents.
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

// Payload bytes are left out so logs stay readable.
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Locally generated reference used to display a selection before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewHandle(Uuid);

impl PreviewHandle {
    /// Generate a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PreviewHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// An accepted image together with its preview handle.
///
/// The handle lives exactly as long as the selection; replacing the
/// selection produces a new handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file: ImageFile,
    preview: PreviewHandle,
}

impl SelectedImage {
    /// Wrap an accepted file with a newly generated preview handle.
    pub fn new(file: ImageFile) -> Self {
        Self {
            file,
            preview: PreviewHandle::new(),
        }
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }

    pub fn preview(&self) -> PreviewHandle {
        self.preview
    }
}
