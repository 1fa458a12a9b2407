use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::error_response::error_response;
use crate::application::ports::WeatherError;
use crate::presentation::state::AppState;

const DEFAULT_CITY: &str = "Seoul";

#[derive(Deserialize, Default)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Serialize)]
pub struct UpstreamErrorResponse {
    pub error: String,
    pub details: serde_json::Value,
}

#[tracing::instrument(skip(state, body))]
pub async fn weather_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: WeatherRequest = serde_json::from_slice(&body).unwrap_or_default();
    let city = request
        .city
        .filter(|city| !city.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CITY.to_string());

    match state.weather_client.current_weather(&city).await {
        Ok(weather) => (StatusCode::OK, Json(weather)).into_response(),
        Err(WeatherError::MissingApiKey) => {
            tracing::error!("Weather API key is not configured");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "날씨 API 키가 설정되지 않았습니다",
            )
        }
        Err(WeatherError::Upstream { status, body }) => {
            tracing::warn!(status, city = %city, "Weather provider returned an error");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(UpstreamErrorResponse {
                    error: "날씨 정보를 가져오지 못했습니다".to_string(),
                    details: body,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Weather request failed");
            error_response(StatusCode::BAD_GATEWAY, "날씨 서버에 연결하지 못했습니다")
        }
    }
}
