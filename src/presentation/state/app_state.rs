use std::sync::Arc;

use crate::application::ports::{AudioNormalizer, WeatherClient};
use crate::application::services::{EngineContext, IntentClassifier};
use crate::presentation::config::Settings;

pub struct AppState {
    pub classifier: Arc<IntentClassifier>,
    pub engines: EngineContext,
    pub audio_normalizer: Arc<dyn AudioNormalizer>,
    pub weather_client: Arc<dyn WeatherClient>,
    pub settings: Arc<Settings>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            engines: self.engines.clone(),
            audio_normalizer: Arc::clone(&self.audio_normalizer),
            weather_client: Arc::clone(&self.weather_client),
            settings: Arc::clone(&self.settings),
        }
    }
}
