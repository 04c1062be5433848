use async_trait::async_trait;

use crate::errors::GenerateError;

pub mod openai;

/// One chat-style exchange: a system message framing the task and a user
/// message carrying the prompt. Implementations return the raw content of the
/// model's reply; an absent content field comes back as an empty string so the
/// caller can classify it.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerateError>;
}

pub type DynProvider = Box<dyn ChatProvider + Send + Sync>;
