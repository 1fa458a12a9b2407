use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::{AudioNormalizationError, AudioNormalizer};
use crate::domain::{AudioFormat, NormalizedAudio};
use crate::presentation::config::AudioSettings;

use super::scratch_file::ScratchFile;

const STDERR_TAIL_CHARS: usize = 400;

/// Converts browser recordings (webm/opus, ogg, m4a, ...) into mono PCM WAV
/// at a fixed sample rate by shelling out to ffmpeg.
pub struct FfmpegAudioNormalizer {
    ffmpeg_path: String,
    sample_rate: u32,
    timeout: Duration,
    scratch_dir: PathBuf,
}

impl FfmpegAudioNormalizer {
    pub fn new(
        ffmpeg_path: impl Into<String>,
        sample_rate: u32,
        timeout: Duration,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            sample_rate,
            timeout,
            scratch_dir,
        }
    }

    pub fn from_settings(settings: &AudioSettings) -> Self {
        Self::new(
            settings.ffmpeg_path.clone(),
            settings.sample_rate,
            Duration::from_secs(settings.transcode_timeout_secs),
            settings.scratch_dir(),
        )
    }

    /// Fixed argument list; nothing user-controlled besides the two scratch
    /// paths generated here.
    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-ac".into(),
            "1".into(),
            "-ar".into(),
            self.sample_rate.to_string().into(),
            "-f".into(),
            "wav".into(),
            output.as_os_str().to_owned(),
        ]
    }

    async fn transcode(
        &self,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<Bytes, AudioNormalizationError> {
        let stem = format!("kiosk-audio-{}", Uuid::new_v4());
        let input = ScratchFile::new(&self.scratch_dir, &stem, format.file_extension());
        let output = ScratchFile::new(&self.scratch_dir, &format!("{}-normalized", stem), "wav");

        tokio::fs::write(input.path(), data).await.map_err(|e| {
            AudioNormalizationError::ConversionFailed(format!("write scratch input: {}", e))
        })?;

        let child = Command::new(&self.ffmpeg_path)
            .args(self.build_args(input.path(), output.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    AudioNormalizationError::ToolUnavailable(format!("{}: {}", self.ffmpeg_path, e))
                }
                _ => AudioNormalizationError::ConversionFailed(format!("spawn: {}", e)),
            })?;

        let finished = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| AudioNormalizationError::ConversionFailed(format!("wait: {}", e)))?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Transcoder exceeded its time budget and was killed"
                );
                return Err(AudioNormalizationError::ConversionTimeout(
                    self.timeout.as_secs(),
                ));
            }
        };

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr);
            return Err(AudioNormalizationError::ConversionFailed(format!(
                "transcoder exited with {}: {}",
                finished.status,
                stderr_tail(&stderr)
            )));
        }

        let wav = match tokio::fs::read(output.path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AudioNormalizationError::ConversionFailed(
                    "transcoder produced no output".to_string(),
                ));
            }
            Err(e) => {
                return Err(AudioNormalizationError::ConversionFailed(format!(
                    "read scratch output: {}",
                    e
                )));
            }
        };

        if wav.is_empty() {
            return Err(AudioNormalizationError::ConversionFailed(
                "transcoder produced an empty output".to_string(),
            ));
        }

        Ok(Bytes::from(wav))
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegAudioNormalizer {
    async fn normalize(
        &self,
        data: Bytes,
        declared_mime: Option<&str>,
    ) -> Result<NormalizedAudio, AudioNormalizationError> {
        if data.is_empty() {
            return Err(AudioNormalizationError::EmptyInput);
        }

        let format = declared_mime
            .map(AudioFormat::from_mime)
            .unwrap_or(AudioFormat::Other);

        if format.is_canonical() {
            tracing::debug!(bytes = data.len(), "Audio already WAV, skipping transcoding");
            return Ok(NormalizedAudio::new(data));
        }

        let started = Instant::now();
        let wav = self.transcode(&data, format).await?;

        tracing::info!(
            declared_mime = declared_mime.unwrap_or("unknown"),
            input_bytes = data.len(),
            output_bytes = wav.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            sample_rate = self.sample_rate,
            "Audio normalized to mono WAV"
        );

        Ok(NormalizedAudio::new(wav))
    }
}

/// Probes `<ffmpeg_path> -version` once at start-up.
pub fn check_ffmpeg_binary(ffmpeg_path: &str) -> Result<(), AudioNormalizationError> {
    let output = std::process::Command::new(ffmpeg_path)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| AudioNormalizationError::ToolUnavailable(format!("{}: {}", ffmpeg_path, e)))?;

    if !output.status.success() {
        return Err(AudioNormalizationError::ToolUnavailable(format!(
            "{} -version exited with {}",
            ffmpeg_path, output.status
        )));
    }

    Ok(())
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    let total = trimmed.chars().count();
    if total <= STDERR_TAIL_CHARS {
        return trimmed.to_string();
    }
    trimmed.chars().skip(total - STDERR_TAIL_CHARS).collect()
}
