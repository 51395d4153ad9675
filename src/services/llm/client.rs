use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::decode::{decode_completion, truncate_front};
use super::ResponseGenerator;
use crate::config::{GenerationParams, GeneratorConfig};
use crate::error::ModelError;
use crate::prompt::TURN_SEPARATOR;

/// Penalty window handed to the server alongside the client-side n-gram cut.
const REPEAT_LAST_N: usize = 64;
const REPEAT_PENALTY: f32 = 1.2;

#[derive(Clone)]
pub struct LLMService {
    client: Client,
    base_url: String,
    params: GenerationParams,
}

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    top_p: f32,
    repeat_last_n: usize,
    repeat_penalty: f32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

impl LLMService {
    pub fn new(config: &GeneratorConfig, params: GenerationParams) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            params,
        }
    }

    /// One-shot readiness check, used at startup only.
    pub async fn health(&self) -> Result<(), ModelError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status()));
        }
        Ok(())
    }

    fn request_for(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            stream: false, // One-shot only
            n_predict: self.params.max_new_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            repeat_last_n: REPEAT_LAST_N,
            repeat_penalty: REPEAT_PENALTY,
            stop: vec![TURN_SEPARATOR.to_string(), "User:".to_string()],
        }
    }
}

#[async_trait]
impl ResponseGenerator for LLMService {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let input = truncate_front(prompt, self.params.max_input_tokens);
        let request_body = self.request_for(input.clone());

        // llama-server style /completion endpoint
        let response = self
            .client
            .post(format!("{}/completion", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status()));
        }

        let resp_json: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        let candidate = decode_completion(&resp_json.content, &input, self.params.no_repeat_ngram_size);
        debug!("Generated candidate ({} chars)", candidate.len());
        Ok(candidate)
    }
}
