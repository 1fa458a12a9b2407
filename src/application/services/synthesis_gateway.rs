use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::domain::EngineState;

use super::engine_lifecycle::EngineLifecycle;

pub struct SynthesisGateway {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    lifecycle: EngineLifecycle,
}

impl SynthesisGateway {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            lifecycle: EngineLifecycle::new("tts"),
        }
    }

    pub fn initialize(&self) -> EngineState {
        self.lifecycle.initialize()
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn state(&self) -> EngineState {
        self.lifecycle.state()
    }

    pub fn close(&self) {
        self.lifecycle.close();
    }

    pub async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError> {
        if !self.lifecycle.is_ready() {
            tracing::warn!(state = %self.state(), "Synthesis requested before engine is ready");
            return Err(SynthesisError::NotReady);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::SynthesisFailed("empty text".to_string()));
        }

        tracing::debug!(chars = text.chars().count(), "Starting speech synthesis");
        let audio = self.synthesizer.synthesize(text).await?;
        tracing::info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
