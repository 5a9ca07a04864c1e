/// "Download the Model" action
///
/// Probes the service's health endpoint first. When the service answers,
/// the bundled model file is copied into the user's download folder; when
/// it does not, the health URL is opened in the browser so the user can see
/// what is going on.
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::{ApiError, DenoiseClient};
use crate::config::DownloadSettings;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DownloadError {
    #[error("Service unavailable ({0}), opened the health page instead")]
    Unhealthy(ApiError),
    /// Health probe failed and the browser could not be launched either
    #[error("Service unavailable ({cause}), check {url}")]
    UnhealthyNotOpened { cause: ApiError, url: String },
    #[error("Model file not found at {0}")]
    MissingAsset(String),
    #[error("Failed to save model: {0}")]
    Copy(String),
}

/// Progress of the download button
#[derive(Debug, Default)]
pub struct DownloadState {
    in_progress: bool,
    /// Outcome of the last attempt, shown under the button
    notice: Option<Result<String, String>>,
}

impl DownloadState {
    /// Returns false if a download is already running
    pub fn begin(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        self.notice = None;
        true
    }

    pub fn finish(&mut self, outcome: Result<PathBuf, DownloadError>) {
        self.in_progress = false;
        self.notice = Some(match outcome {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Model download complete");
                Ok(format!("Model saved to {}", path.display()))
            }
            Err(err) => {
                tracing::error!("Download failed: {}", err);
                Err(err.to_string())
            }
        });
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn notice(&self) -> Option<&Result<String, String>> {
        self.notice.as_ref()
    }
}

/// Folder the model is saved to
pub fn default_destination() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Run the whole download flow
///
/// # Arguments
/// * `client` - Service client, used for the health probe
/// * `settings` - Where the bundled model lives and what to call the copy
/// * `destination` - Folder to copy the model into
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the saved copy
/// * `Err(DownloadError)` - Health probe or copy failed
pub async fn download_model(
    client: DenoiseClient,
    settings: DownloadSettings,
    destination: PathBuf,
) -> Result<PathBuf, DownloadError> {
    match client.health().await {
        Ok(health) => {
            tracing::info!(
                status = health.status.as_deref().unwrap_or("unknown"),
                model_loaded = ?health.model_loaded,
                "Service healthy, saving model"
            );
        }
        Err(err) => {
            // Show the user the health page so they can see why
            let url = client.health_url();
            let opened = open::that_detached(&url);
            return Err(unhealthy(err, url, opened));
        }
    }

    copy_asset(&settings.asset_path, &destination.join(&settings.file_name)).await
}

fn unhealthy(cause: ApiError, url: String, opened: std::io::Result<()>) -> DownloadError {
    match opened {
        Ok(()) => DownloadError::Unhealthy(cause),
        Err(open_err) => {
            tracing::warn!("Could not open {}: {}", url, open_err);
            DownloadError::UnhealthyNotOpened { cause, url }
        }
    }
}

async fn copy_asset(source: &Path, target: &Path) -> Result<PathBuf, DownloadError> {
    if !tokio::fs::try_exists(source).await.unwrap_or(false) {
        return Err(DownloadError::MissingAsset(source.display().to_string()));
    }

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::Copy(e.to_string()))?;
    }

    tokio::fs::copy(source, target)
        .await
        .map_err(|e| DownloadError::Copy(e.to_string()))?;

    Ok(target.to_path_buf())
}
