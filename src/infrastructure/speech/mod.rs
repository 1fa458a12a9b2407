mod google_translate_tts;
mod mock_speech_synthesizer;

pub use google_translate_tts::{GoogleTranslateTts, MAX_CHUNK_CHARS, split_for_tts};
pub use mock_speech_synthesizer::MockSpeechSynthesizer;
