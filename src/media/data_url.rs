/// `data:` URL helpers
///
/// The service embeds its result images as `data:image/png;base64,...` or
/// links to them with an absolute URL.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageRefError {
    #[error("not a data URL or http(s) URL: {0}")]
    UnknownScheme(String),
    #[error("data URL is missing its payload")]
    MissingPayload,
    #[error("only base64 data URLs are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// Where an image returned by the service lives
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    Embedded { mime: String, bytes: Bytes },
    Remote(String),
}

impl ImageRef {
    pub fn parse(reference: &str) -> Result<Self, ImageRefError> {
        let reference = reference.trim();

        if let Some(rest) = reference.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or(ImageRefError::MissingPayload)?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or(ImageRefError::NotBase64)?;
            let bytes = STANDARD
                .decode(payload)
                .map_err(|e| ImageRefError::Base64(e.to_string()))?;
            return Ok(ImageRef::Embedded {
                mime: mime.to_string(),
                bytes: Bytes::from(bytes),
            });
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Ok(ImageRef::Remote(reference.to_string()));
        }

        // Keep error messages short; embedded payloads can be megabytes
        let shown: String = reference.chars().take(32).collect();
        Err(ImageRefError::UnknownScheme(shown))
    }
}

/// Build a base64 data URL
#[cfg(test)]
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_browser_format() {
        assert_eq!(encode("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_parse_embedded() {
        let parsed = ImageRef::parse("data:image/png;base64,YWJj").unwrap();
        assert_eq!(
            parsed,
            ImageRef::Embedded {
                mime: "image/png".into(),
                bytes: Bytes::from_static(b"abc"),
            }
        );
    }

    #[test]
    fn test_parse_remote() {
        let parsed = ImageRef::parse("https://example.org/out.png").unwrap();
        assert_eq!(parsed, ImageRef::Remote("https://example.org/out.png".into()));
    }

    #[test]
    fn test_rejects_plain_data_url() {
        assert_eq!(
            ImageRef::parse("data:text/plain,hello"),
            Err(ImageRefError::NotBase64)
        );
        assert_eq!(
            ImageRef::parse("data:image/png;base64"),
            Err(ImageRefError::MissingPayload)
        );
    }

    #[test]
    fn test_rejects_relative_paths() {
        assert!(matches!(
            ImageRef::parse("/static/out.png"),
            Err(ImageRefError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_rejects_bad_base64() {
        assert!(matches!(
            ImageRef::parse("data:image/png;base64,@@@"),
            Err(ImageRefError::Base64(_))
        ));
    }
}
