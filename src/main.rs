use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use kiosk_assistant::application::services::{EngineContext, IntentClassifier};
use kiosk_assistant::infrastructure::audio::{
    EtriSpeechEngine, FfmpegAudioNormalizer, check_ffmpeg_binary,
};
use kiosk_assistant::infrastructure::llm::OpenAiClient;
use kiosk_assistant::infrastructure::observability::{TracingConfig, init_tracing};
use kiosk_assistant::infrastructure::speech::GoogleTranslateTts;
use kiosk_assistant::infrastructure::weather::OpenWeatherMapClient;
use kiosk_assistant::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let tracing_config = TracingConfig::from_settings(environment, &settings.logging);
    init_tracing(&tracing_config);

    tracing::info!(
        environment = %tracing_config.environment,
        port = settings.server.port,
        json_format = tracing_config.json_format,
        sample_rate = settings.audio.sample_rate,
        reject_unknown_labels = settings.classifier.reject_unknown_labels,
        "Kiosk assistant starting"
    );

    if let Err(e) = check_ffmpeg_binary(&settings.audio.ffmpeg_path) {
        tracing::warn!(error = %e, "ffmpeg is not usable, non-WAV uploads will fail");
    }
    if settings.stt.api_key.is_empty() {
        tracing::warn!("ETRI_API_KEY is not set");
    }
    if settings.llm.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set, classification will rely on keywords");
    }

    let llm_client = Arc::new(
        OpenAiClient::new(&settings.llm).context("Failed to build language model client")?,
    );
    let classifier = IntentClassifier::new(
        llm_client,
        Arc::new(settings.classifier.purpose_mapping()),
        Duration::from_secs(settings.classifier.llm_timeout_secs),
    )
    .with_label_validation(settings.classifier.reject_unknown_labels);

    let speech_engine = Arc::new(
        EtriSpeechEngine::from_settings(&settings.stt)
            .context("Failed to build speech recognition client")?,
    );
    let synthesizer = Arc::new(
        GoogleTranslateTts::from_settings(&settings.tts)
            .context("Failed to build speech synthesis client")?,
    );
    let engines = EngineContext::new(speech_engine, synthesizer);
    engines.initialize();

    let weather_client = Arc::new(
        OpenWeatherMapClient::new(&settings.weather).context("Failed to build weather client")?,
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        classifier: Arc::new(classifier),
        engines: engines.clone(),
        audio_normalizer: Arc::new(FfmpegAudioNormalizer::from_settings(&settings.audio)),
        weather_client,
        settings: Arc::new(settings),
    };

    let app = create_router(state);

    tracing::info!(addr = %addr, "Server listening");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    engines.close();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
