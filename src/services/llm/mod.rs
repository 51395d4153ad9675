pub mod client;
pub mod decode;

use async_trait::async_trait;

use crate::error::ModelError;

pub use client::LLMService;

/// A loaded generation model: prompt in, continuation out.
/// The continuation may be empty; length policy is applied downstream.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
