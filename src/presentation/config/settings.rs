use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Deserializer};

use super::environment::Environment;
use crate::domain::{PurposeEntry, PurposeMapping};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for SettingsError {
    fn from(e: config::ConfigError) -> Self {
        SettingsError::Load(e.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub stt: SttSettings,
    pub tts: TtsSettings,
    pub audio: AudioSettings,
    pub llm: LlmSettings,
    pub classifier: ClassifierSettings,
    pub weather: WeatherSettings,
    pub kiosk: KioskSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(deserialize_with = "comma_separated")]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Accepts a YAML list or a comma-separated string from the environment.
fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Origins::deserialize(deserializer)? {
        Origins::List(origins) => origins,
        Origins::Csv(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect(),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SttSettings {
    pub api_url: String,
    pub api_key: String,
    pub language_code: String,
    pub request_timeout_secs: u64,
}

impl Default for SttSettings {
    fn default() -> Self {
        Self {
            api_url: "http://aiopen.etri.re.kr:8000/WiseASR/Recognition".to_string(),
            api_key: String::new(),
            language_code: "korean".to_string(),
            request_timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TtsSettings {
    pub base_url: String,
    pub language: String,
    pub request_timeout_secs: u64,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            language: "ko".to_string(),
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ffmpeg_path: String,
    pub sample_rate: u32,
    pub transcode_timeout_secs: u64,
    /// Falls back to the OS temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AudioSettings {
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            sample_rate: 16_000,
            transcode_timeout_secs: 30,
            scratch_dir: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_tokens: 32,
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub llm_timeout_secs: u64,
    pub reject_unknown_labels: bool,
    pub keywords: Vec<PurposeEntry>,
}

impl ClassifierSettings {
    pub fn purpose_mapping(&self) -> PurposeMapping {
        PurposeMapping::new(self.keywords.clone())
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            llm_timeout_secs: 15,
            reject_unknown_labels: false,
            keywords: PurposeMapping::default().entries().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub units: String,
    pub lang: String,
    pub request_timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org".to_string(),
            units: "metric".to_string(),
            lang: "kr".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KioskSettings {
    pub pin: String,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            pin: "1234".to_string(),
        }
    }
}

impl Settings {
    /// Loads `config/appsettings.yaml`, the environment overlay and `APP__*`
    /// variables, then applies the plain secret variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let mut settings = Self::from_dir(Path::new("config"), environment, "APP")?;
        settings.apply_secret_overrides(|name| std::env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Layered load without secret overrides or validation.
    pub fn from_dir(
        dir: &Path,
        environment: Environment,
        env_prefix: &str,
    ) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .set_default("logging.enable_json", environment.json_logs_by_default())?
            .set_default(
                "classifier.reject_unknown_labels",
                environment.rejects_unknown_labels_by_default(),
            )?
            .add_source(yaml_source(&dir.join("appsettings.yaml")))
            .add_source(yaml_source(
                &dir.join(format!("{}.yaml", environment.config_file_name())),
            ))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn apply_secret_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup("ETRI_API_KEY") {
            self.stt.api_key = key;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = key;
        }
        if let Some(key) = lookup("OPENWEATHER_API_KEY") {
            self.weather.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::Invalid("server.port must be non-zero".into()));
        }
        if self.stt.api_url.trim().is_empty() {
            return Err(SettingsError::Invalid("stt.api_url is empty".into()));
        }
        if !(8_000..=48_000).contains(&self.audio.sample_rate) {
            return Err(SettingsError::Invalid(format!(
                "audio.sample_rate {} outside 8000..=48000",
                self.audio.sample_rate
            )));
        }

        let timeouts = [
            ("stt.request_timeout_secs", self.stt.request_timeout_secs),
            ("tts.request_timeout_secs", self.tts.request_timeout_secs),
            ("audio.transcode_timeout_secs", self.audio.transcode_timeout_secs),
            ("llm.request_timeout_secs", self.llm.request_timeout_secs),
            ("classifier.llm_timeout_secs", self.classifier.llm_timeout_secs),
            ("weather.request_timeout_secs", self.weather.request_timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(SettingsError::Invalid(format!("{} must be non-zero", name)));
        }

        if let Some(entry) = self
            .classifier
            .keywords
            .iter()
            .find(|entry| entry.phrase.trim().is_empty() || entry.label.trim().is_empty())
        {
            return Err(SettingsError::Invalid(format!(
                "classifier.keywords has an empty entry: {:?} -> {:?}",
                entry.phrase, entry.label
            )));
        }

        Ok(())
    }
}

fn yaml_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::new(&path.to_string_lossy(), FileFormat::Yaml).required(false)
}
