//! Loading image files from disk.

use std::io;
use std::path::Path;

use deepguard_models::ImageFile;
use image::ImageFormat;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Declared media type for a path, derived from its extension.
///
/// Image extensions resolve through [`ImageFormat`]; a handful of common
/// non-image types are recognised so they can be rejected by name.
pub fn media_type_for_path(path: &Path) -> &'static str {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type();
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("svg") => "image/svg+xml",
        Some("heic") => "image/heic",
        Some("txt") | Some("log") | Some("md") => "text/plain",
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mp3") => "audio/mpeg",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// Read a file into an [`ImageFile`].
///
/// No validation happens here; the session decides whether the declared
/// media type is acceptable.
pub async fn load_image(path: impl AsRef<Path>) -> io::Result<ImageFile> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ImageFile::new(file_name, media_type_for_path(path), bytes))
}
