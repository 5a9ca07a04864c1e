/// Wire types for the denoising service
///
/// Everything here mirrors the JSON the service returns. Fields the UI can
/// live without are optional so that a partial `/model-info` answer still
/// renders.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string the service puts in a successful `/denoise` answer
pub const SUCCESS_STATUS: &str = "✅ success";

/// Shape used when the service does not report one
pub const DEFAULT_SHAPE: [i64; 4] = [1, 512, 512, 1];

/// Runtime provider used when the service does not report any
pub const DEFAULT_PROVIDER: &str = "CPUExecutionProvider";

const UNKNOWN: &str = "Unknown";

/// Response body of `POST /denoise`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub images: ResultImages,
    pub metrics: QualityMetrics,
    pub processing_info: ProcessingInfo,
}

impl InferenceResult {
    /// Only results carrying the success sentinel are shown
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Image references: data URLs or absolute URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultImages {
    pub original: String,
    pub noisy: String,
    pub denoised: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub psnr: f64,
    pub ssim: f64,
    pub iqi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub model_type: String,
    pub input_size: Vec<u32>,
    pub processed_size: Vec<u32>,
    /// The service reports either a flag or a description of the noise
    pub noise_added: NoiseAdded,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoiseAdded {
    Flag(bool),
    Description(String),
}

impl fmt::Display for NoiseAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseAdded::Flag(true) => write!(f, "Yes"),
            NoiseAdded::Flag(false) => write!(f, "No"),
            NoiseAdded::Description(text) => write!(f, "{}", text),
        }
    }
}

/// Response body of `GET /model-info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub input_info: Option<TensorInfo>,
    #[serde(default)]
    pub output_info: Option<TensorInfo>,
    #[serde(default)]
    pub providers: Option<Vec<String>>,
    #[serde(default)]
    pub onnx_version: Option<String>,
    #[serde(default)]
    pub architecture: Option<Architecture>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TensorInfo {
    /// `None` entries are dynamic dimensions (usually the batch)
    #[serde(default)]
    pub shape: Option<Vec<Option<i64>>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Architecture {
    #[serde(default)]
    pub total_parameters: Option<ParameterCount>,
    #[serde(default)]
    pub layers: Option<u32>,
    /// The original backend reports the shapes here instead of `input_info`
    #[serde(default)]
    pub input_shape: Option<Vec<Option<i64>>>,
    #[serde(default)]
    pub output_shape: Option<Vec<Option<i64>>>,
}

/// The service formats the count itself ("1,234,567") but a bare number is
/// accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterCount {
    Count(u64),
    Text(String),
}

impl fmt::Display for ParameterCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterCount::Count(n) => write!(f, "{}", n),
            ParameterCount::Text(text) => write!(f, "{}", text),
        }
    }
}

impl ModelInfo {
    /// Record shown when `/model-info` cannot be loaded
    pub fn fallback() -> Self {
        let shape: Vec<Option<i64>> = DEFAULT_SHAPE.iter().map(|&d| Some(d)).collect();
        Self {
            model_name: Some("Image_Denoiser".into()),
            model_type: Some("CNN Denoiser".into()),
            input_info: Some(TensorInfo {
                shape: Some(shape.clone()),
            }),
            output_info: Some(TensorInfo { shape: Some(shape) }),
            providers: Some(vec![DEFAULT_PROVIDER.into()]),
            onnx_version: None,
            architecture: Some(Architecture {
                total_parameters: Some(ParameterCount::Text(UNKNOWN.into())),
                ..Architecture::default()
            }),
        }
    }

    pub fn name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn kind(&self) -> &str {
        self.model_type.as_deref().unwrap_or(UNKNOWN)
    }

    /// `input_info.shape`, then `architecture.input_shape`, then the default
    pub fn input_shape(&self) -> Vec<Option<i64>> {
        shape_or_default(
            self.input_info.as_ref(),
            self.architecture.as_ref().and_then(|a| a.input_shape.as_ref()),
        )
    }

    pub fn output_shape(&self) -> Vec<Option<i64>> {
        shape_or_default(
            self.output_info.as_ref(),
            self.architecture.as_ref().and_then(|a| a.output_shape.as_ref()),
        )
    }

    pub fn providers(&self) -> Vec<String> {
        match &self.providers {
            Some(list) if !list.is_empty() => list.clone(),
            _ => vec![DEFAULT_PROVIDER.to_string()],
        }
    }

    pub fn total_parameters(&self) -> String {
        self.architecture
            .as_ref()
            .and_then(|a| a.total_parameters.as_ref())
            .map(|p| p.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn layers(&self) -> String {
        self.architecture
            .as_ref()
            .and_then(|a| a.layers)
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

fn shape_or_default(
    info: Option<&TensorInfo>,
    architecture: Option<&Vec<Option<i64>>>,
) -> Vec<Option<i64>> {
    info.and_then(|i| i.shape.clone())
        .or_else(|| architecture.cloned())
        .unwrap_or_else(|| DEFAULT_SHAPE.iter().map(|&d| Some(d)).collect())
}

/// Formats a shape the way the service prints it: `[null, 512, 512, 1]`
pub fn format_shape(shape: &[Option<i64>]) -> String {
    let dims: Vec<String> = shape
        .iter()
        .map(|d| match d {
            Some(n) => n.to_string(),
            None => "null".to_string(),
        })
        .collect();
    format!("[{}]", dims.join(", "))
}

/// Response body of `GET /health`; only used for logging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}
