mod engine_context;
mod engine_lifecycle;
mod intent_classifier;
mod synthesis_gateway;
mod transcription_gateway;

pub use engine_context::EngineContext;
pub use engine_lifecycle::EngineLifecycle;
pub use intent_classifier::{
    INSTRUCTION_PROMPT, IntentClassifier, SYSTEM_PROMPT, build_user_prompt,
};
pub use synthesis_gateway::SynthesisGateway;
pub use transcription_gateway::TranscriptionGateway;
