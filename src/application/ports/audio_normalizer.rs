use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::NormalizedAudio;

#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(
        &self,
        data: Bytes,
        declared_mime: Option<&str>,
    ) -> Result<NormalizedAudio, AudioNormalizationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioNormalizationError {
    #[error("audio input is empty")]
    EmptyInput,
    #[error("transcoder unavailable: {0}")]
    ToolUnavailable(String),
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
    #[error("conversion timed out after {0} s")]
    ConversionTimeout(u64),
}
