mod audio_normalizer;
mod llm_client;
mod speech_synthesizer;
mod transcription_engine;
mod weather_client;

pub use audio_normalizer::{AudioNormalizationError, AudioNormalizer};
pub use llm_client::{LlmClient, LlmClientError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use weather_client::{WeatherClient, WeatherError};
