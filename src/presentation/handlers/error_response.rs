use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{AudioNormalizationError, SynthesisError, TranscriptionError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn normalization_error_response(error: &AudioNormalizationError) -> Response {
    match error {
        AudioNormalizationError::EmptyInput => {
            error_response(StatusCode::BAD_REQUEST, "오디오 파일이 비어 있습니다")
        }
        AudioNormalizationError::ConversionFailed(_)
        | AudioNormalizationError::ConversionTimeout(_) => {
            error_response(StatusCode::BAD_GATEWAY, "오디오 변환에 실패했습니다")
        }
        AudioNormalizationError::ToolUnavailable(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "오디오 변환 도구를 사용할 수 없습니다",
        ),
    }
}

pub fn transcription_error_response(error: &TranscriptionError) -> Response {
    match error {
        TranscriptionError::NotReady => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "음성 인식 엔진이 준비되지 않았습니다",
        ),
        TranscriptionError::TranscriptionFailed(_) => {
            error_response(StatusCode::BAD_GATEWAY, "음성 인식에 실패했습니다")
        }
    }
}

pub fn synthesis_error_response(error: &SynthesisError) -> Response {
    match error {
        SynthesisError::NotReady => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "음성 합성 엔진이 준비되지 않았습니다",
        ),
        SynthesisError::SynthesisFailed(_) => {
            error_response(StatusCode::BAD_GATEWAY, "음성 합성에 실패했습니다")
        }
    }
}
