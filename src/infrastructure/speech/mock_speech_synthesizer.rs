use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

pub struct MockSpeechSynthesizer {
    reply: Result<Bytes, String>,
    calls: AtomicUsize,
}

impl MockSpeechSynthesizer {
    pub fn new(audio: &'static [u8]) -> Self {
        Self {
            reply: Ok(Bytes::from_static(audio)),
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
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(SynthesisError::SynthesisFailed)
    }
}
