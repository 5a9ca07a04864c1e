//! In-process stand-in for the denoising service, used by tests.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use crate::media::data_url;

pub const NOISY_BYTES: &[u8] = b"noisy pixels";
pub const DENOISED_BYTES: &[u8] = b"denoised pixels";

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Every endpoint answers like the real service
    Healthy,
    /// Every endpoint answers 500
    Failing,
    /// 200 with a body that is not the expected JSON
    Garbled,
}

#[derive(Clone)]
struct StubState {
    behaviour: Behaviour,
    base_url: String,
}

/// Bind an ephemeral port and serve the stub; returns its base URL
pub async fn spawn(behaviour: Behaviour) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let state = StubState {
        behaviour,
        base_url: base_url.clone(),
    };
    let router = Router::new()
        .route("/denoise", post(denoise))
        .route("/model-info", get(model_info))
        .route("/health", get(health))
        .route("/files/denoised.png", get(denoised_file))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    base_url
}

fn canned(behaviour: Behaviour) -> Option<Response> {
    match behaviour {
        Behaviour::Healthy => None,
        Behaviour::Failing => {
            Some((StatusCode::INTERNAL_SERVER_ERROR, "Processing failed").into_response())
        }
        Behaviour::Garbled => Some((StatusCode::OK, "<html>maintenance</html>").into_response()),
    }
}

async fn denoise(State(state): State<StubState>, mut multipart: Multipart) -> Response {
    if let Some(response) = canned(state.behaviour) {
        return response;
    }

    let mut upload = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let mime = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            upload = Some((file_name, mime, bytes));
        }
    }

    let Some((file_name, mime, bytes)) = upload else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "field `file` required").into_response();
    };

    Json(json!({
        "status": "✅ success",
        "message": "Image successfully denoised",
        "images": {
            "original": data_url::encode(&mime, &bytes),
            "noisy": data_url::encode("image/png", NOISY_BYTES),
            "denoised": format!("{}/files/denoised.png", state.base_url),
        },
        "metrics": { "psnr": 30.5, "ssim": 0.91, "iqi": 0.77 },
        "processing_info": {
            "filename": file_name,
            "input_size": [512, 512],
            "processed_size": [512, 512],
            "noise_added": "Gaussian (σ=10-35)",
            "model_type": "CNN Denoiser"
        }
    }))
    .into_response()
}

async fn model_info(State(state): State<StubState>) -> Response {
    if let Some(response) = canned(state.behaviour) {
        return response;
    }

    Json(json!({
        "model_name": "dual_branch_denoiser",
        "model_type": "onnx",
        "input_info": { "shape": [null, 512, 512, 1] },
        "output_info": { "shape": [null, 512, 512, 1] },
        "providers": ["CPUExecutionProvider"]
    }))
    .into_response()
}

async fn health(State(state): State<StubState>) -> Response {
    if let Some(response) = canned(state.behaviour) {
        return response;
    }

    Json(json!({ "status": "🟢 healthy", "model_loaded": true })).into_response()
}

async fn denoised_file() -> &'static [u8] {
    DENOISED_BYTES
}
