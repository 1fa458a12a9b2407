use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use kiosk_assistant::application::ports::{
    AudioNormalizationError, AudioNormalizer, LlmClient, WeatherClient, WeatherError,
};
use kiosk_assistant::application::services::{EngineContext, IntentClassifier};
use kiosk_assistant::domain::{PurposeMapping, UNKNOWN_PURPOSE};
use kiosk_assistant::infrastructure::audio::{MockAudioNormalizer, MockTranscriptionEngine};
use kiosk_assistant::infrastructure::llm::{FailingLlmClient, MockLlmClient};
use kiosk_assistant::infrastructure::observability::{KIOSK_ID_HEADER, REQUEST_ID_HEADER};
use kiosk_assistant::infrastructure::speech::MockSpeechSynthesizer;
use kiosk_assistant::presentation::{AppState, Settings, create_router};

const BOUNDARY: &str = "kiosk-test-boundary";

enum WeatherReply {
    Ok,
    MissingKey,
    NotFound,
}

struct MockWeatherClient {
    reply: WeatherReply,
}

#[async_trait]
impl WeatherClient for MockWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError> {
        match self.reply {
            WeatherReply::Ok => Ok(json!({ "name": city, "main": { "temp": 18.0 } })),
            WeatherReply::MissingKey => Err(WeatherError::MissingApiKey),
            WeatherReply::NotFound => Err(WeatherError::Upstream {
                status: 404,
                body: json!({ "message": "city not found" }),
            }),
        }
    }
}

struct TestApp {
    router: Router,
    engine: Arc<MockTranscriptionEngine>,
    synthesizer: Arc<MockSpeechSynthesizer>,
    normalizer: Arc<MockAudioNormalizer>,
}

struct TestAppBuilder {
    llm: Arc<dyn LlmClient>,
    normalizer: Arc<MockAudioNormalizer>,
    weather: WeatherReply,
    initialize_engines: bool,
    settings: Settings,
}

impl TestAppBuilder {
    fn new() -> Self {
        Self {
            llm: Arc::new(MockLlmClient::new(UNKNOWN_PURPOSE)),
            normalizer: Arc::new(MockAudioNormalizer::passthrough()),
            weather: WeatherReply::Ok,
            initialize_engines: true,
            settings: Settings::default(),
        }
    }

    fn llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = llm;
        self
    }

    fn normalizer(mut self, normalizer: MockAudioNormalizer) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    fn weather(mut self, weather: WeatherReply) -> Self {
        self.weather = weather;
        self
    }

    fn uninitialized(mut self) -> Self {
        self.initialize_engines = false;
        self
    }

    fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.settings.audio.max_upload_bytes = limit;
        self
    }

    fn build(self) -> TestApp {
        let engine = Arc::new(MockTranscriptionEngine::new("등본 뽑아줘"));
        let synthesizer = Arc::new(MockSpeechSynthesizer::new(b"ID3mock-mp3"));
        let engines = EngineContext::new(engine.clone(), synthesizer.clone());
        if self.initialize_engines {
            engines.initialize();
        }

        let classifier = IntentClassifier::new(
            self.llm,
            Arc::new(PurposeMapping::default()),
            Duration::from_secs(5),
        );
        let audio_normalizer: Arc<dyn AudioNormalizer> = self.normalizer.clone();

        let state = AppState {
            classifier: Arc::new(classifier),
            engines,
            audio_normalizer,
            weather_client: Arc::new(MockWeatherClient {
                reply: self.weather,
            }),
            settings: Arc::new(self.settings),
        };

        TestApp {
            router: create_router(state),
            engine,
            synthesizer,
            normalizer: self.normalizer,
        }
    }
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(uri: &str, field: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"voice.webm\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_app_when_checking_health_then_reports_engine_states() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["transcription"], "ready");
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_it_is_echoed() {
    let app = TestAppBuilder::new().build();
    let request = Request::get("/health")
        .header(REQUEST_ID_HEADER, "kiosk-42")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "kiosk-42");
}

#[tokio::test]
async fn given_blank_request_id_and_kiosk_id_when_calling_then_fresh_request_id_is_returned() {
    let app = TestAppBuilder::new().build();
    let request = Request::get("/health")
        .header(REQUEST_ID_HEADER, "   ")
        .header(KIOSK_ID_HEADER, "counter-3")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    let request_id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn given_certificate_utterance_when_receiving_text_then_llm_source_with_matched_keyword() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(json_request("/receive-text/", r#"{"text":"등본 뽑아줘"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "llm");
    assert_eq!(body["summary"], "주민등록등본 발급 요청");
    assert_eq!(body["purpose"], "주민등록등본 발급 요청");
    assert_eq!(body["matched_keyword"], "등본");
}

#[tokio::test]
async fn given_unmatched_utterance_when_receiving_text_then_model_label_is_returned() {
    let app = TestAppBuilder::new()
        .llm(Arc::new(MockLlmClient::new("주민등록증 재발급 요청")))
        .build();

    let response = app
        .router
        .oneshot(json_request("/receive-text/", r#"{"text":"신분증 잃어버렸어요"}"#))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["source"], "llm");
    assert_eq!(body["purpose"], "주민등록증 재발급 요청");
    assert!(body["matched_keyword"].is_null());
}

#[tokio::test]
async fn given_model_outage_when_receiving_text_then_analysis_failed_with_200() {
    let app = TestAppBuilder::new()
        .llm(Arc::new(FailingLlmClient::new()))
        .build();

    let response = app
        .router
        .oneshot(json_request("/receive-text/", r#"{"text":"잡담"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "error");
    assert_eq!(body["summary"], UNKNOWN_PURPOSE);
    assert_eq!(body["purpose"], "분석 실패");
}

#[tokio::test]
async fn given_body_without_text_when_receiving_text_then_empty_utterance_is_classified() {
    let llm = Arc::new(MockLlmClient::new(UNKNOWN_PURPOSE));
    let app = TestAppBuilder::new().llm(llm.clone()).build();

    let response = app
        .router
        .oneshot(json_request("/receive-text/", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "llm");
    assert_eq!(body["purpose"], UNKNOWN_PURPOSE);
    assert!(body["matched_keyword"].is_null());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn given_malformed_json_when_receiving_text_then_analysis_failed_with_200() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(json_request("/receive-text/", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "error");
    assert_eq!(body["purpose"], "분석 실패");
}

#[tokio::test]
async fn given_empty_text_when_requesting_tts_then_400_without_synthesis() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(form_request("/api/tts", "text="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.synthesizer.calls(), 0);
}

#[tokio::test]
async fn given_text_when_requesting_tts_then_returns_mp3() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(form_request(
            "/api/tts",
            "text=%EC%95%88%EB%85%95%ED%95%98%EC%84%B8%EC%9A%94",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ID3mock-mp3");
    assert_eq!(app.synthesizer.calls(), 1);
}

#[tokio::test]
async fn given_multipart_text_when_requesting_tts_then_returns_mp3() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(multipart_request(
            "/api/tts",
            "text",
            "text/plain",
            "안내 방송".as_bytes(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.synthesizer.calls(), 1);
}

#[tokio::test]
async fn given_uninitialized_engines_when_requesting_tts_then_503() {
    let app = TestAppBuilder::new().uninitialized().build();

    let response = app
        .router
        .oneshot(form_request("/api/tts", "text=hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(app.synthesizer.calls(), 0);
}

#[tokio::test]
async fn given_uninitialized_engines_when_uploading_audio_then_503_before_normalizing() {
    let app = TestAppBuilder::new().uninitialized().build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", b"webm-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(app.normalizer.calls(), 0);
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn given_audio_upload_when_transcribing_then_returns_text() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", b"webm-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["text"], "등본 뽑아줘");
    assert_eq!(app.normalizer.calls(), 1);
    assert_eq!(app.engine.calls(), 1);
}

#[tokio::test]
async fn given_upload_without_file_field_when_transcribing_then_400() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "audio", "audio/webm", b"webm-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn given_empty_upload_when_transcribing_then_400() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn given_failed_conversion_when_transcribing_then_502() {
    let app = TestAppBuilder::new()
        .normalizer(MockAudioNormalizer::failing(|| {
            AudioNormalizationError::ConversionFailed("corrupt container".to_string())
        }))
        .build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", b"garbage"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().contains("corrupt container"));
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn given_missing_transcoder_when_transcribing_then_500() {
    let app = TestAppBuilder::new()
        .normalizer(MockAudioNormalizer::failing(|| {
            AudioNormalizationError::ToolUnavailable("ffmpeg".to_string())
        }))
        .build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", b"webm"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_oversized_upload_when_transcribing_then_413() {
    let app = TestAppBuilder::new().max_upload_bytes(64).build();

    let response = app
        .router
        .oneshot(multipart_request("/api/stt", "file", "audio/webm", &[0u8; 1024]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn given_correct_pin_when_recognizing_then_success() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(json_request("/recognition/", r#"{"pin":"1234"}"#))
        .await
        .unwrap();

    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn given_wrong_pin_when_recognizing_then_failure() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(json_request("/recognition/", r#"{"pin":"0000"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": false }));
}

#[tokio::test]
async fn given_no_city_when_requesting_weather_then_defaults_to_seoul() {
    let app = TestAppBuilder::new().build();

    let response = app
        .router
        .oneshot(json_request("/weather/", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Seoul");
}

#[tokio::test]
async fn given_missing_weather_key_when_requesting_weather_then_500() {
    let app = TestAppBuilder::new()
        .weather(WeatherReply::MissingKey)
        .build();

    let response = app
        .router
        .oneshot(json_request("/weather/", r#"{"city":"Busan"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_unknown_city_when_requesting_weather_then_upstream_status_and_details() {
    let app = TestAppBuilder::new().weather(WeatherReply::NotFound).build();

    let response = app
        .router
        .oneshot(json_request("/weather/", r#"{"city":"Atlantis"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["details"]["message"], "city not found");
    assert!(body["error"].is_string());
}
