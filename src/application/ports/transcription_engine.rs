use async_trait::async_trait;

use crate::domain::NormalizedAudio;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &NormalizedAudio) -> Result<String, TranscriptionError>;
}

/// Callers see only two kinds; the cause string is kept for logs.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription engine is not ready")]
    NotReady,
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
}
