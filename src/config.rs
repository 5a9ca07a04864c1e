/// Application settings
///
/// Loaded once at startup from `configuration/base.yaml` (optional) and
/// `DENOISE_`-prefixed environment variables, e.g.
/// `DENOISE_API__BASE_URL=http://localhost:8000`.
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// How long the boot splash stays up before the main UI
    pub splash_ms: u64,
    pub api: ApiSettings,
    pub upload: UploadSettings,
    pub download: DownloadSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            splash_ms: 3000,
            api: ApiSettings::default(),
            upload: UploadSettings::default(),
            download: DownloadSettings::default(),
        }
    }
}

impl Settings {
    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.try_into().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the inference service, without trailing slash
    pub base_url: String,
    /// Request timeout; unset means the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://covid-reduce-noise-backend.onrender.com".into(),
            timeout_secs: None,
        }
    }
}

impl ApiSettings {
    pub fn get_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadSettings {
    pub max_file_size_mb: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
        }
    }
}

impl UploadSettings {
    pub fn get_max_file_size(&self) -> u64 {
        self.max_file_size_mb * MIB
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DownloadSettings {
    /// Bundled model file offered by the "download" button
    pub asset_path: PathBuf,
    /// Name given to the copy in the user's download folder
    pub file_name: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from("assets/best_denoiser2.h5"),
            file_name: "best_denoiser2.h5".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            other => Err(format!(
                "{} is not a supported minimum log level. Use `debug`, `info` or `warn`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no working directory: {}", e)))?;
    let configuration_file = base_path.join("configuration").join("base.yaml");

    load_from(config::File::from(configuration_file).required(false))
}

fn load_from<S>(file: S) -> Result<Settings, config::ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("DENOISE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
