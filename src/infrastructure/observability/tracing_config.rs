use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub default_directive: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON even where the settings turn it off.
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            json_format: log_format_is_json() || logging.enable_json,
            default_directive: directive(&logging.level),
        }
    }
}

fn log_format_is_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn directive(level: &str) -> String {
    format!("{},kiosk_assistant=debug,tower_http=debug", level)
}
