use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{EngineState, NormalizedAudio};

use super::engine_lifecycle::EngineLifecycle;

pub struct TranscriptionGateway {
    engine: Arc<dyn TranscriptionEngine>,
    lifecycle: EngineLifecycle,
}

impl TranscriptionGateway {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self {
            engine,
            lifecycle: EngineLifecycle::new("stt"),
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

    /// An empty utterance is a valid result, not an error.
    pub async fn transcribe(&self, audio: &NormalizedAudio) -> Result<String, TranscriptionError> {
        if !self.lifecycle.is_ready() {
            tracing::warn!(state = %self.state(), "Transcription requested before engine is ready");
            return Err(TranscriptionError::NotReady);
        }

        let text = self.engine.transcribe(audio).await?;

        if text.trim().is_empty() {
            tracing::warn!(
                bytes = audio.len(),
                "Recognition returned an empty utterance"
            );
            return Ok(String::new());
        }

        tracing::info!(chars = text.chars().count(), "Transcription completed");
        Ok(text)
    }
}
