use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::NormalizedAudio;
use crate::presentation::config::SttSettings;

/// Client for the ETRI open speech-recognition API. The audio travels as
/// base64 inside a JSON envelope; the key goes in `Authorization` verbatim.
pub struct EtriSpeechEngine {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    language_code: String,
}

impl EtriSpeechEngine {
    pub fn new(
        api_url: &str,
        api_key: &str,
        language_code: &str,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            language_code: language_code.to_string(),
        })
    }

    pub fn from_settings(settings: &SttSettings) -> Result<Self, TranscriptionError> {
        Self::new(
            &settings.api_url,
            &settings.api_key,
            &settings.language_code,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }
}

#[derive(Serialize)]
struct RecognitionRequest<'a> {
    argument: RecognitionArgument<'a>,
}

#[derive(Serialize)]
struct RecognitionArgument<'a> {
    language_code: &'a str,
    audio: String,
}

#[derive(Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    result: Option<i64>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    return_object: Option<RecognitionObject>,
}

#[derive(Deserialize)]
struct RecognitionObject {
    #[serde(default)]
    recognized: Option<String>,
}

#[async_trait]
impl TranscriptionEngine for EtriSpeechEngine {
    async fn transcribe(&self, audio: &NormalizedAudio) -> Result<String, TranscriptionError> {
        let body = RecognitionRequest {
            argument: RecognitionArgument {
                language_code: &self.language_code,
                audio: STANDARD.encode(audio.as_bytes()),
            },
        };

        tracing::debug!(
            bytes = audio.len(),
            language = %self.language_code,
            "Sending audio to ETRI recognition API"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::TranscriptionFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RecognitionResponse = response.json().await.map_err(|e| {
            TranscriptionError::TranscriptionFailed(format!("parse response: {}", e))
        })?;

        if let Some(code) = result.result.filter(|code| *code != 0) {
            return Err(TranscriptionError::TranscriptionFailed(format!(
                "result {}: {}",
                code,
                result.reason.unwrap_or_default()
            )));
        }

        let recognized = result
            .return_object
            .and_then(|object| object.recognized)
            .unwrap_or_default();

        if recognized.trim().is_empty() {
            tracing::warn!("ETRI API did not recognize any speech");
            return Ok(String::new());
        }

        tracing::info!(
            chars = recognized.chars().count(),
            "ETRI transcription completed"
        );

        Ok(recognized.trim().to_string())
    }
}
