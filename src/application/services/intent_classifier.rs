use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ClassificationResult, PurposeMapping, UNKNOWN_PURPOSE};
use crate::infrastructure::observability::sanitize_prompt;

pub const SYSTEM_PROMPT: &str = "넌 공공기관 키오스크 AI야. 사용자 목적만 예시처럼 한 줄로 써줘. 예시 없는 건 '민원 목적을 알 수 없음'만 써.";

pub const INSTRUCTION_PROMPT: &str = r#"
당신은 민원 키오스크 안내 도우미입니다.
아래는 사용자의 다양한 민원 요청 예시입니다.
반드시 **예시와 똑같은 한글 한 줄 요약**만 출력하세요.

[민원 목적 요약 예시]
- "등본 뽑아줘" → "주민등록등본 발급 요청"
- "등본 때고 싶어요" → "주민등록등본 발급 요청"
- "주민등록등본 필요합니다" → "주민등록등본 발급 요청"
- "초본 출력" → "주민등록초본 발급 요청"
- "가족관계증명서 뽑아줘" → "가족관계증명서 발급 요청"
- "가족관계증명 뽑을래" → "가족관계증명서 발급 요청"
- "토지대장 떼고싶어" → "토지(임야)대장 발급 요청"
- "여권 신청하고 싶어요" → "여권 발급 신청"
- "주민등록증 재발급 받아야 해" → "주민등록증 재발급 요청"
- "출입국 사실 증명 해주세요" → "출입국 사실증명 발급 요청"
- "공무원 시험 접수 안내해줘" → "민원 목적을 알 수 없음"
- "키오스크 고장났어요" → "민원 목적을 알 수 없음"
- "잡담" → "민원 목적을 알 수 없음"

[지침]
- 예시와 같이 반드시 한글 한 줄 요약으로만 답하세요.
- 예시에 없는 민원/잡담/질문 등은 반드시 '민원 목적을 알 수 없음'만 답하세요.
- 설명, 부가 텍스트, 인삿말 절대 금지.
"#;

/// Keyword lookup first, language model second, degraded answer last.
/// `classify` never fails.
pub struct IntentClassifier {
    llm_client: Arc<dyn LlmClient>,
    mapping: Arc<PurposeMapping>,
    llm_timeout: Duration,
    reject_unknown_labels: bool,
}

impl IntentClassifier {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        mapping: Arc<PurposeMapping>,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            llm_client,
            mapping,
            llm_timeout,
            reject_unknown_labels: false,
        }
    }

    /// When enabled, a model reply outside the canonical label set is
    /// replaced by the unknown sentinel.
    pub fn with_label_validation(mut self, enabled: bool) -> Self {
        self.reject_unknown_labels = enabled;
        self
    }

    pub fn mapping(&self) -> &PurposeMapping {
        &self.mapping
    }

    #[tracing::instrument(skip(self, text))]
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        if let Some(entry) = self.mapping.find(text) {
            tracing::info!(phrase = %entry.phrase, purpose = %entry.label, "Keyword match");
            return ClassificationResult::keyword(&entry.label, &entry.phrase);
        }

        tracing::debug!(
            text = %sanitize_prompt(text),
            "No keyword match, asking language model"
        );

        match self.ask_language_model(text).await {
            Ok(label) => self.accept_model_label(label),
            Err(e) => {
                tracing::warn!(error = %e, "Language model classification failed, degrading");
                self.degrade(text)
            }
        }
    }

    async fn ask_language_model(&self, text: &str) -> Result<String, LlmClientError> {
        let prompt = build_user_prompt(text);
        let call = self.llm_client.complete(SYSTEM_PROMPT, &prompt);

        let reply = match tokio::time::timeout(self.llm_timeout, call).await {
            Ok(result) => result?,
            Err(_) => return Err(LlmClientError::Timeout(self.llm_timeout.as_millis())),
        };

        extract_label(&reply)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty reply".to_string()))
    }

    fn accept_model_label(&self, label: String) -> ClassificationResult {
        if self.mapping.is_canonical(&label) {
            tracing::info!(purpose = %label, "Language model classification");
            return ClassificationResult::language_model(label);
        }

        tracing::warn!(
            purpose = %sanitize_prompt(&label),
            "Language model returned an unlisted label"
        );
        if self.reject_unknown_labels {
            ClassificationResult::language_model(UNKNOWN_PURPOSE)
        } else {
            ClassificationResult::language_model(label)
        }
    }

    fn degrade(&self, text: &str) -> ClassificationResult {
        match self.mapping.find_relaxed(text) {
            Some(entry) => {
                tracing::info!(phrase = %entry.phrase, "Relaxed keyword match after model failure");
                ClassificationResult::fallback(&entry.label, Some(entry.phrase.clone()))
            }
            None => ClassificationResult::fallback(UNKNOWN_PURPOSE, None),
        }
    }
}

pub fn build_user_prompt(text: &str) -> String {
    format!("{}\n\"{}\"", INSTRUCTION_PROMPT.trim(), text)
}

// First non-empty line, without surrounding quotes.
fn extract_label(reply: &str) -> Option<String> {
    reply
        .lines()
        .map(|line| {
            line.trim()
                .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”'))
                .trim()
        })
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
