mod etri_speech_engine;
mod ffmpeg_audio_normalizer;
mod mock_audio;
mod scratch_file;

pub use etri_speech_engine::EtriSpeechEngine;
pub use ffmpeg_audio_normalizer::{FfmpegAudioNormalizer, check_ffmpeg_binary};
pub use mock_audio::{MockAudioNormalizer, MockTranscriptionEngine};
pub use scratch_file::ScratchFile;
