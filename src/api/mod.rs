/// Client side of the denoising service
///
/// - `client.rs` - HTTP calls (`/denoise`, `/model-info`, `/health`)
/// - `types.rs` - JSON wire types
/// - `error.rs` - transport/status/decode failures

pub mod client;
pub mod error;
pub mod types;

pub use client::DenoiseClient;
pub use error::ApiError;
pub use types::{InferenceResult, ModelInfo};

#[cfg(test)]
pub(crate) mod stub;
