use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns encoded audio (MP3) built entirely in memory.
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis engine is not ready")]
    NotReady,
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
}
