use async_trait::async_trait;

#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions for `city`, passed through as the provider's JSON.
    async fn current_weather(&self, city: &str) -> Result<serde_json::Value, WeatherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather api key is not configured")]
    MissingApiKey,
    #[error("upstream returned status {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },
    #[error("request failed: {0}")]
    RequestFailed(String),
}
