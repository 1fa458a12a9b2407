use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::future::try_join_all;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::presentation::config::TtsSettings;

/// The endpoint refuses longer `q` values.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Text-to-speech through Google Translate's `translate_tts` endpoint, the
/// same backend gTTS talks to. Each chunk comes back as a self-contained MP3
/// stream, so chunk bodies are concatenated as-is.
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Result<Self, SynthesisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SynthesisError::SynthesisFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn from_settings(settings: &TtsSettings) -> Result<Self, SynthesisError> {
        Self::new(
            &settings.base_url,
            &settings.language,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url);
        let idx = idx.to_string();
        let total = total.to_string();
        let text_len = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::SynthesisFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(SynthesisError::SynthesisFailed(format!(
                "chunk {} returned status {}",
                idx,
                response.status()
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::SynthesisFailed(format!("body: {}", e)))?;

        if audio.is_empty() {
            return Err(SynthesisError::SynthesisFailed(format!(
                "chunk {} returned no audio",
                idx
            )));
        }

        Ok(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::SynthesisFailed(
                "nothing to synthesize".to_string(),
            ));
        }

        let total = chunks.len();
        tracing::debug!(chunks = total, language = %self.language, "Requesting speech chunks");

        let parts = try_join_all(
            chunks
                .iter()
                .enumerate()
                .map(|(idx, chunk)| self.fetch_chunk(chunk, idx, total)),
        )
        .await?;

        let mut audio = BytesMut::with_capacity(parts.iter().map(Bytes::len).sum());
        for part in parts {
            audio.extend_from_slice(&part);
        }

        Ok(audio.freeze())
    }
}

/// Packs whitespace-separated words into chunks of at most `max_chars`
/// characters. A single word longer than the limit is cut on character
/// boundaries.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            let needed = if current.is_empty() {
                piece_len
            } else {
                current_len + 1 + piece_len
            };

            if needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|piece| piece.iter().collect())
        .collect()
}
