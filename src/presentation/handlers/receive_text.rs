use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{ANALYSIS_FAILED, ClassificationResult, Provenance};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ReceiveTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiveTextResponse {
    pub source: String,
    pub summary: String,
    pub purpose: String,
    pub matched_keyword: Option<String>,
}

impl From<ClassificationResult> for ReceiveTextResponse {
    fn from(result: ClassificationResult) -> Self {
        let purpose = match (&result.provenance, &result.matched_phrase) {
            (Provenance::FallbackError, None) => ANALYSIS_FAILED.to_string(),
            _ => result.purpose.clone(),
        };
        Self {
            source: response_source(result.provenance).to_string(),
            summary: result.purpose,
            purpose,
            matched_keyword: result.matched_phrase,
        }
    }
}

/// The kiosk only distinguishes an answered request from a degraded one.
/// Keyword hits stay visible through `matched_keyword`.
fn response_source(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Keyword | Provenance::LanguageModel => Provenance::LanguageModel.as_str(),
        Provenance::FallbackError => Provenance::FallbackError.as_str(),
    }
}

/// Always answers 200 so the kiosk can render whatever came back.
#[tracing::instrument(skip(state, body))]
pub async fn receive_text_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ReceiveTextRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable receive-text body");
            return (
                StatusCode::OK,
                Json(ReceiveTextResponse {
                    source: response_source(Provenance::FallbackError).to_string(),
                    summary: ANALYSIS_FAILED.to_string(),
                    purpose: ANALYSIS_FAILED.to_string(),
                    matched_keyword: None,
                }),
            )
                .into_response();
        }
    };

    tracing::info!(text = %sanitize_prompt(&request.text), "Received utterance");

    let result = state.classifier.classify(&request.text).await;

    (StatusCode::OK, Json(ReceiveTextResponse::from(result))).into_response()
}
