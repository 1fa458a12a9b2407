mod audio;
mod classification;
mod engine_state;
mod purpose;

pub use audio::{AudioFormat, NormalizedAudio};
pub use classification::{ClassificationResult, Provenance};
pub use engine_state::EngineState;
pub use purpose::{ANALYSIS_FAILED, PurposeEntry, PurposeMapping, UNKNOWN_PURPOSE};
