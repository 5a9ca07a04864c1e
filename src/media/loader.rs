/// Image file loader
///
/// Reads a picked or dropped file, works out its MIME type and applies the
/// client-side checks (image type, size cap) before anything is shown or
/// uploaded.
use bytes::Bytes;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::SelectedImage;

/// MIME used when neither the extension nor the content identify the file
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Extensions offered by the file picker
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please upload a valid image file (got {0}).")]
    UnsupportedType(String),
    #[error("Image is {size_mb:.1} MB, the limit is {limit_mb} MB.")]
    TooLarge { size_mb: f64, limit_mb: u64 },
    #[error("Could not read {0}")]
    Unreadable(String),
}

/// Load a file from disk into a `SelectedImage`
///
/// # Arguments
/// * `path` - File chosen in the picker or dropped on the window
/// * `max_bytes` - Size cap, checked against the file metadata before reading
///
/// # Returns
/// * `Ok(SelectedImage)` - Name, detected MIME type and content
/// * `Err(ValidationError::TooLarge)` - The file is over the cap; nothing was read
/// * `Err(ValidationError::Unreadable)` - The file could not be read
pub async fn load_image(path: PathBuf, max_bytes: u64) -> Result<SelectedImage, ValidationError> {
    let unreadable = |e: std::io::Error| ValidationError::Unreadable(format!("{}: {}", path.display(), e));

    // Reject oversized files from their metadata so they are never loaded
    let size = tokio::fs::metadata(&path).await.map_err(unreadable)?.len();
    check_size(size, max_bytes)?;

    let content = tokio::fs::read(&path).await.map_err(unreadable)?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let mime = detect_mime(&path, &content);

    tracing::debug!(file = %file_name, %mime, size = content.len(), "Loaded image file");

    Ok(SelectedImage {
        file_name,
        mime,
        bytes: Bytes::from(content),
    })
}

/// MIME type from the extension, falling back to the file signature
pub fn detect_mime(path: &Path, content: &[u8]) -> String {
    if let Ok(format) = image::ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    match image::guess_format(content) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => UNKNOWN_MIME.to_string(),
    }
}

/// Accept only `image/*` files no larger than `max_bytes`
pub fn validate(image: &SelectedImage, max_bytes: u64) -> Result<(), ValidationError> {
    if !image.mime.starts_with("image/") {
        return Err(ValidationError::UnsupportedType(image.mime.clone()));
    }

    // The file may have grown between the metadata check and the read
    check_size(image.size(), max_bytes)
}

fn check_size(size: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if size > max_bytes {
        return Err(ValidationError::TooLarge {
            size_mb: size as f64 / 1024.0 / 1024.0,
            limit_mb: max_bytes / (1024 * 1024),
        });
    }
    Ok(())
}
