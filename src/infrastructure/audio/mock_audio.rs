use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{
    AudioNormalizationError, AudioNormalizer, TranscriptionEngine, TranscriptionError,
};
use crate::domain::NormalizedAudio;

pub struct MockTranscriptionEngine {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl MockTranscriptionEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            reply: Err(cause.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio: &NormalizedAudio) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(TranscriptionError::TranscriptionFailed)
    }
}

/// Passes bytes through untouched, or fails with a fixed error.
pub struct MockAudioNormalizer {
    failure: Option<fn() -> AudioNormalizationError>,
    calls: AtomicUsize,
}

impl MockAudioNormalizer {
    pub fn passthrough() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: fn() -> AudioNormalizationError) -> Self {
        Self {
            failure: Some(failure),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioNormalizer for MockAudioNormalizer {
    async fn normalize(
        &self,
        data: Bytes,
        _declared_mime: Option<&str>,
    ) -> Result<NormalizedAudio, AudioNormalizationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if data.is_empty() {
            return Err(AudioNormalizationError::EmptyInput);
        }
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(NormalizedAudio::new(data)),
        }
    }
}
