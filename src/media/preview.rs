/// Local preview of a selected image
/// Built off the UI thread from the exact bytes that will be uploaded
use std::io::Cursor;

use crate::state::data::{DisplayImage, Preview, SelectedImage};

/// Generate the preview for a selected image
pub async fn generate_preview(image: SelectedImage) -> Result<Preview, String> {
    // Header probing and handle creation stay off the executor
    tokio::task::spawn_blocking(move || generate_preview_blocking(&image))
        .await
        .map_err(|e| format!("Task join error: {}", e))
}

fn generate_preview_blocking(image: &SelectedImage) -> Preview {
    let dimensions = probe_dimensions(&image.bytes);

    if dimensions.is_none() {
        tracing::warn!(file = %image.file_name, "Could not read image header for preview");
    }

    Preview {
        image: DisplayImage::new(image.bytes.clone()),
        dimensions,
    }
}

/// Width and height from the image header, without decoding pixels
fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn tiny_png() -> Vec<u8> {
        let img = image::GrayImage::from_pixel(3, 2, image::Luma([128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_preview_is_built_from_exact_bytes() {
        let png = tiny_png();
        let selected = SelectedImage {
            file_name: "tiny.png".into(),
            mime: "image/png".into(),
            bytes: Bytes::from(png.clone()),
        };

        let preview = generate_preview(selected).await.unwrap();

        assert_eq!(&preview.image.bytes[..], &png[..]);
        assert_eq!(preview.dimensions, Some((3, 2)));
    }

    #[tokio::test]
    async fn test_unreadable_header_still_previews() {
        let selected = SelectedImage {
            file_name: "broken.png".into(),
            mime: "image/png".into(),
            bytes: Bytes::from_static(b"not really a png"),
        };

        let preview = generate_preview(selected).await.unwrap();
        assert!(preview.dimensions.is_none());
        assert_eq!(&preview.image.bytes[..], b"not really a png");
    }
}
