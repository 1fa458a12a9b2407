use axum::Form;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::error_response::{error_response, synthesis_error_response};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TtsForm {
    #[serde(default)]
    pub text: String,
}

/// Accepts `text` as a urlencoded or multipart form field.
#[tracing::instrument(skip(state, request))]
pub async fn tts_handler(State(state): State<AppState>, request: Request) -> Response {
    let text = match read_text_field(request).await {
        Ok(text) => text,
        Err(response) => return response,
    };

    if text.trim().is_empty() {
        tracing::warn!("TTS request with empty text");
        return error_response(StatusCode::BAD_REQUEST, "텍스트가 비어 있습니다");
    }

    match state.engines.synthesis.synthesize(&text).await {
        Ok(audio) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mpeg")],
            audio,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Synthesis failed");
            synthesis_error_response(&e)
        }
    }
}

async fn read_text_field(request: Request) -> Result<String, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if !is_multipart {
        return match Form::<TtsForm>::from_request(request, &()).await {
            Ok(Form(form)) => Ok(form.text),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable TTS form");
                Err(error_response(StatusCode::BAD_REQUEST, "텍스트가 비어 있습니다"))
            }
        };
    }

    let mut multipart = Multipart::from_request(request, &()).await.map_err(|e| {
        tracing::warn!(error = %e, "Unreadable TTS multipart");
        error_response(StatusCode::BAD_REQUEST, "텍스트가 비어 있습니다")
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read multipart");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "요청을 읽지 못했습니다")
    })? {
        if field.name() == Some("text") {
            return field.text().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to read text field");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "요청을 읽지 못했습니다")
            });
        }
    }

    Ok(String::new())
}
