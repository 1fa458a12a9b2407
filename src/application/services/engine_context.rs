use std::sync::Arc;

use crate::application::ports::{SpeechSynthesizer, TranscriptionEngine};

use super::synthesis_gateway::SynthesisGateway;
use super::transcription_gateway::TranscriptionGateway;

/// The process-wide speech engines. Built once in `main` and handed to the
/// router through `AppState`.
#[derive(Clone)]
pub struct EngineContext {
    pub transcription: Arc<TranscriptionGateway>,
    pub synthesis: Arc<SynthesisGateway>,
}

impl EngineContext {
    pub fn new(
        transcription_engine: Arc<dyn TranscriptionEngine>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            transcription: Arc::new(TranscriptionGateway::new(transcription_engine)),
            synthesis: Arc::new(SynthesisGateway::new(synthesizer)),
        }
    }

    pub fn initialize(&self) {
        self.transcription.initialize();
        self.synthesis.initialize();
    }

    pub fn close(&self) {
        self.transcription.close();
        self.synthesis.close();
    }
}
