use std::fmt;

/// Which path of the classifier produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Keyword,
    LanguageModel,
    FallbackError,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Keyword => "keyword",
            Provenance::LanguageModel => "llm",
            Provenance::FallbackError => "error",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub purpose: String,
    pub provenance: Provenance,
    pub matched_phrase: Option<String>,
}

impl ClassificationResult {
    pub fn keyword(purpose: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            provenance: Provenance::Keyword,
            matched_phrase: Some(phrase.into()),
        }
    }

    pub fn language_model(purpose: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            provenance: Provenance::LanguageModel,
            matched_phrase: None,
        }
    }

    pub fn fallback(purpose: impl Into<String>, phrase: Option<String>) -> Self {
        Self {
            purpose: purpose.into(),
            provenance: Provenance::FallbackError,
            matched_phrase: phrase,
        }
    }
}
