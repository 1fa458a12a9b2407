mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, ClassifierSettings, KioskSettings, LlmSettings, LoggingSettings,
    ServerSettings, Settings, SettingsError, SttSettings, TtsSettings, WeatherSettings,
};
