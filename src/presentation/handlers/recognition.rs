use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct RecognitionRequest {
    pub pin: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionResponse {
    pub success: bool,
}

#[tracing::instrument(skip(state, body))]
pub async fn recognition_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let success = serde_json::from_slice::<RecognitionRequest>(&body)
        .map(|request| request.pin.trim() == state.settings.kiosk.pin)
        .unwrap_or(false);

    if !success {
        tracing::info!("PIN recognition rejected");
    }

    (StatusCode::OK, Json(RecognitionResponse { success }))
}
