use bytes::Bytes;

/// Container declared by the uploader. The declaration may be wrong; only
/// `Wav` short-circuits transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Webm,
    Ogg,
    Mp4,
    Mpeg,
    Other,
}

impl AudioFormat {
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Self::Wav,
            "audio/webm" | "video/webm" => Self::Webm,
            "audio/ogg" | "application/ogg" => Self::Ogg,
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "video/mp4" => Self::Mp4,
            "audio/mpeg" | "audio/mp3" => Self::Mpeg,
            _ => Self::Other,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Wav)
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Mp4 => "m4a",
            Self::Mpeg => "mp3",
            Self::Other => "bin",
        }
    }
}

/// Mono, fixed-rate PCM WAV ready for the recognition backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAudio {
    bytes: Bytes,
}

impl NormalizedAudio {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}
