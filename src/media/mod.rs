/// Image file handling
///
/// This module handles:
/// - Reading picked/dropped files and validating them (loader.rs)
/// - Building local previews (preview.rs)
/// - Encoding and parsing `data:` URLs (data_url.rs)

pub mod data_url;
pub mod loader;
pub mod preview;
