/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the service client, the background tasks and the UI layer.
use bytes::Bytes;
use iced::widget::image::Handle;

use crate::api::InferenceResult;

/// The image the user picked or dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Filename only (e.g., "chest_ct_01.png")
    pub file_name: String,
    /// MIME type, e.g. "image/png"
    pub mime: String,
    /// Full file content
    pub bytes: Bytes,
}

impl SelectedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Decoded-once image ready for the image widget
#[derive(Debug, Clone)]
pub struct DisplayImage {
    pub bytes: Bytes,
    pub handle: Handle,
}

impl DisplayImage {
    pub fn new(bytes: Bytes) -> Self {
        let handle = Handle::from_bytes(bytes.clone());
        Self { bytes, handle }
    }
}

/// Local preview of the selected image
#[derive(Debug, Clone)]
pub struct Preview {
    /// Built from the exact bytes that will be uploaded
    pub image: DisplayImage,
    /// Pixel size, when the header could be read
    pub dimensions: Option<(u32, u32)>,
}

/// A parsed `/denoise` answer with its three images fetched/decoded
#[derive(Debug, Clone)]
pub struct Denoised {
    pub result: InferenceResult,
    pub original: DisplayImage,
    pub noisy: DisplayImage,
    pub denoised: DisplayImage,
}
