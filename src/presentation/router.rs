use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, receive_text_handler, recognition_handler, stt_handler, tts_handler,
    weather_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .settings
        .server
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_upload_bytes = state.settings.audio.max_upload_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route("/receive-text/", post(receive_text_handler))
        .route("/api/stt", post(stt_handler))
        .route("/api/tts", post(tts_handler))
        .route("/weather/", post(weather_handler))
        .route("/recognition/", post(recognition_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
