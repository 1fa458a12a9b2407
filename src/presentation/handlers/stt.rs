use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::error_response::{
    error_response, normalization_error_response, transcription_error_response,
};
use crate::application::ports::TranscriptionError;
use crate::presentation::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct SttResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn stt_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    if !state.engines.transcription.is_initialized() {
        tracing::warn!("STT request before the recognition engine is ready");
        return transcription_error_response(&TranscriptionError::NotReady);
    }

    let mut upload = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let content_type = field.content_type().map(str::to_string);
                match field.bytes().await {
                    Ok(data) => {
                        upload = Some((data, content_type));
                        break;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read upload");
                        return multipart_error_response(e.status());
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return multipart_error_response(e.status());
            }
        }
    }

    let Some((data, content_type)) = upload else {
        tracing::warn!("STT request without a file field");
        return error_response(StatusCode::BAD_REQUEST, "오디오 파일이 없습니다");
    };

    tracing::debug!(
        bytes = data.len(),
        content_type = content_type.as_deref().unwrap_or("unknown"),
        "Processing audio upload"
    );

    let audio = match state
        .audio_normalizer
        .normalize(data, content_type.as_deref())
        .await
    {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(error = %e, "Audio normalization failed");
            return normalization_error_response(&e);
        }
    };

    match state.engines.transcription.transcribe(&audio).await {
        Ok(text) => (StatusCode::OK, Json(SttResponse { text })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            transcription_error_response(&e)
        }
    }
}

fn multipart_error_response(status: StatusCode) -> Response {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return error_response(status, "업로드 용량을 초과했습니다");
    }
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "업로드를 읽지 못했습니다")
}
