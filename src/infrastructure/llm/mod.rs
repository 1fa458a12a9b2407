mod mock_llm_client;
mod openai_client;

pub use mock_llm_client::{FailingLlmClient, MockLlmClient};
pub use openai_client::OpenAiClient;
