use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{WeatherClient, WeatherError};
use crate::presentation::config::WeatherSettings;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
    lang: String,
}

impl OpenWeatherMapClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| WeatherError::RequestFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|key| !key.trim().is_empty()),
            units: settings.units.clone(),
            lang: settings.lang.clone(),
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    async fn current_weather(&self, city: &str) -> Result<serde_json::Value, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::json!({ "message": text }));
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let weather: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherError::RequestFailed(format!("parse response: {}", e)))?;

        tracing::info!(city = %city, "Weather lookup succeeded");
        Ok(weather)
    }
}
