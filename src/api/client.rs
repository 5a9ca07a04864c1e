use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use tracing::instrument;

use super::error::ApiError;
use super::types::{HealthStatus, InferenceResult, ModelInfo};
use crate::config::ApiSettings;
use crate::media::data_url::ImageRef;
use crate::state::data::{Denoised, DisplayImage, SelectedImage};

/// Multipart field the service reads the upload from
const UPLOAD_FIELD: &str = "file";

/// HTTP client for the denoising service.
///
/// Cheap to clone; every background task gets its own copy.
#[derive(Debug, Clone)]
pub struct DenoiseClient {
    http: reqwest::Client,
    base_url: String,
}

impl DenoiseClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.get_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: settings.get_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_url(&self) -> String {
        self.endpoint("/health")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /model-info`
    #[instrument(skip(self))]
    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        let response = self.http.get(self.endpoint("/model-info")).send().await?;
        let body = check_status(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /health`; any 2xx counts as healthy, the body is best-effort
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.http.get(self.health_url()).send().await?;
        let body = check_status(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    /// `POST /denoise` with the image as multipart field `file`.
    ///
    /// Image references in the answer are resolved before returning, so the
    /// caller gets displayable bytes for all three images.
    #[instrument(skip(self, image), fields(file = %image.file_name, size = image.size()))]
    pub async fn denoise(&self, image: &SelectedImage) -> Result<Denoised, ApiError> {
        // Single `file` part; file name and MIME type are passed through
        let part = Part::stream_with_length(image.bytes.clone(), image.size())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.endpoint("/denoise"))
            .multipart(form)
            .send()
            .await?;
        // Non-2xx is reported by status code only, the body is not parsed
        let body = check_status(response)?.bytes().await?;
        let result: InferenceResult = serde_json::from_slice(&body)?;

        // Fetch remote images concurrently; embedded ones decode immediately
        let (original, noisy, denoised) = tokio::try_join!(
            self.resolve_image(&result.images.original),
            self.resolve_image(&result.images.noisy),
            self.resolve_image(&result.images.denoised),
        )?;

        tracing::info!(
            psnr = result.metrics.psnr,
            ssim = result.metrics.ssim,
            iqi = result.metrics.iqi,
            "Denoising finished"
        );

        Ok(Denoised {
            result,
            original,
            noisy,
            denoised,
        })
    }

    /// Turn an image reference from the answer into displayable bytes
    async fn resolve_image(&self, reference: &str) -> Result<DisplayImage, ApiError> {
        match ImageRef::parse(reference).map_err(|e| ApiError::Decode(e.to_string()))? {
            ImageRef::Embedded { mime, bytes } => {
                // Anything but an image would only fail later inside the image widget
                if !mime.starts_with("image/") {
                    return Err(ApiError::Decode(format!("embedded {} is not an image", mime)));
                }
                Ok(DisplayImage::new(bytes))
            }
            ImageRef::Remote(url) => {
                let response = self.http.get(&url).send().await?;
                let bytes: Bytes = check_status(response)?.bytes().await?;
                Ok(DisplayImage::new(bytes))
            }
        }
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %response.url(), status = status.as_u16(), "Service returned an error");
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub;

    fn client_for(base_url: String) -> DenoiseClient {
        DenoiseClient::new(&ApiSettings {
            base_url,
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    fn scan() -> SelectedImage {
        SelectedImage {
            file_name: "scan.png".into(),
            mime: "image/png".into(),
            bytes: Bytes::from_static(b"\x89PNG fake scan"),
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:8000/".into());
        assert_eq!(client.health_url(), "http://localhost:8000/health");
    }

    #[tokio::test]
    async fn test_denoise_uploads_file_field_and_resolves_images() {
        let base = stub::spawn(stub::Behaviour::Healthy).await;
        let client = client_for(base);

        let denoised = client.denoise(&scan()).await.unwrap();

        assert!(denoised.result.is_success());
        // The stub echoes the uploaded `file` part back as the original
        assert_eq!(&denoised.original.bytes[..], b"\x89PNG fake scan");
        assert_eq!(&denoised.noisy.bytes[..], stub::NOISY_BYTES);
        // Fetched from the stub's remote URL
        assert_eq!(&denoised.denoised.bytes[..], stub::DENOISED_BYTES);
        assert_eq!(
            denoised.result.processing_info.filename.as_deref(),
            Some("scan.png")
        );
    }

    #[tokio::test]
    async fn test_embedded_non_image_is_decode_error() {
        let client = client_for("http://127.0.0.1:9".into());

        let err = client
            .resolve_image("data:text/html;base64,PGgxPg==")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(msg) if msg.contains("text/html")));

        let image = client.resolve_image("data:image/png;base64,YWJj").await.unwrap();
        assert_eq!(&image.bytes[..], b"abc");
    }

    #[tokio::test]
    async fn test_server_error_reports_status_code() {
        let base = stub::spawn(stub::Behaviour::Failing).await;
        let client = client_for(base);

        let err = client.denoise(&scan()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = stub::spawn(stub::Behaviour::Garbled).await;
        let client = client_for(base);

        assert!(matches!(
            client.denoise(&scan()).await,
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(client.model_info().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_model_info() {
        let base = stub::spawn(stub::Behaviour::Healthy).await;
        let client = client_for(base);

        let info = client.model_info().await.unwrap();
        assert_eq!(info.name(), "dual_branch_denoiser");
        assert_eq!(info.providers(), vec!["CPUExecutionProvider".to_string()]);
    }

    #[tokio::test]
    async fn test_health() {
        let base = stub::spawn(stub::Behaviour::Healthy).await;
        let health = client_for(base).health().await.unwrap();
        assert_eq!(health.model_loaded, Some(true));

        let base = stub::spawn(stub::Behaviour::Failing).await;
        assert!(matches!(
            client_for(base).health().await,
            Err(ApiError::Status(500))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Nothing listens on port 9 (discard) on the loopback interface
        let client = client_for("http://127.0.0.1:9".into());
        assert!(matches!(
            client.model_info().await,
            Err(ApiError::Transport(_))
        ));
    }
}
