use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one system/user exchange and returns the raw reply text.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out after {0} ms")]
    Timeout(u128),
}
