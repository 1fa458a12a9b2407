use serde::Deserialize;

/// Sentinel the classifier returns when no civil-affairs purpose applies.
pub const UNKNOWN_PURPOSE: &str = "민원 목적을 알 수 없음";

/// Shown to the kiosk when classification could not be performed at all.
pub const ANALYSIS_FAILED: &str = "분석 실패";

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("등본", "주민등록등본 발급 요청"),
    ("초본", "주민등록초본 발급 요청"),
    ("가족관계증명", "가족관계증명서 발급 요청"),
    ("가족관계", "가족관계증명서 발급 요청"),
    ("토지대장", "토지(임야)대장 발급 요청"),
    ("여권", "여권 발급 신청"),
    ("주민등록증", "주민등록증 재발급 요청"),
    ("출입국", "출입국 사실증명 발급 요청"),
    ("건강보험", "건강보험자격득실확인서 발급 요청"),
    ("날씨", "날씨 정보 조회 요청"),
    ("축제", "행사 정보 조회 요청"),
    ("행사", "행사 정보 조회 요청"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PurposeEntry {
    pub phrase: String,
    pub label: String,
}

impl PurposeEntry {
    pub fn new(phrase: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            label: label.into(),
        }
    }
}

/// Ordered phrase → purpose table.
///
/// Lookup is first-match in insertion order: an earlier, shorter phrase wins
/// over a later, more specific one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurposeMapping {
    entries: Vec<PurposeEntry>,
}

impl PurposeMapping {
    pub fn new(entries: Vec<PurposeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PurposeEntry] {
        &self.entries
    }

    pub fn find(&self, text: &str) -> Option<&PurposeEntry> {
        if text.trim().is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| !entry.phrase.is_empty() && text.contains(entry.phrase.as_str()))
    }

    /// Same ordered scan with whitespace removed from both sides, so that
    /// "가족 관계" still reaches the "가족관계" entry.
    pub fn find_relaxed(&self, text: &str) -> Option<&PurposeEntry> {
        let compact = strip_whitespace(text);
        if compact.is_empty() {
            return None;
        }
        self.entries.iter().find(|entry| {
            let phrase = strip_whitespace(&entry.phrase);
            !phrase.is_empty() && compact.contains(phrase.as_str())
        })
    }

    pub fn is_canonical(&self, label: &str) -> bool {
        label == UNKNOWN_PURPOSE || self.entries.iter().any(|entry| entry.label == label)
    }

    /// Distinct labels in first-seen order, followed by the unknown sentinel.
    pub fn canonical_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !labels.contains(&entry.label.as_str()) {
                labels.push(entry.label.as_str());
            }
        }
        labels.push(UNKNOWN_PURPOSE);
        labels
    }
}

impl Default for PurposeMapping {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRIES
                .iter()
                .map(|(phrase, label)| PurposeEntry::new(*phrase, *label))
                .collect(),
        )
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
