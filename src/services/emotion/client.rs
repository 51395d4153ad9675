use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

use crate::emotion::{EmotionClassifier, EmotionLabel};
use crate::error::ModelError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for a text-classification inference endpoint
/// (`{"inputs": ..}` in, `[{label, score}]` out).
#[derive(Clone)]
pub struct HttpEmotionClassifier {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Servers differ on whether a single input is wrapped in an outer batch array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ClassificationResponse::Batched(batch) => batch.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(scores) => scores,
        }
    }
}

impl HttpEmotionClassifier {
    pub fn new(url: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    async fn classify(&self, utterance: &str) -> Result<EmotionLabel, ModelError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ClassificationRequest { inputs: utterance })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status()));
        }

        let parsed: ClassificationResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        let best = parsed
            .into_scores()
            .into_iter()
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
            .ok_or_else(|| ModelError::Decode("classifier returned no labels".to_string()))?;

        Ok(EmotionLabel::from_model_label(&best.label))
    }
}
