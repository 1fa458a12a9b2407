mod error_response;
mod health;
mod receive_text;
mod recognition;
mod stt;
mod tts;
mod weather;

pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use receive_text::{ReceiveTextResponse, receive_text_handler};
pub use recognition::{RecognitionResponse, recognition_handler};
pub use stt::{SttResponse, stt_handler};
pub use tts::tts_handler;
pub use weather::weather_handler;
