use thiserror::Error;

/// Failures talking to the denoising service.
///
/// Clone so it can travel inside UI messages; transport errors are kept as
/// their rendered text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-2xx answer; the body is not inspected
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
