use async_trait::async_trait;

use super::types::EmotionLabel;
use crate::error::ModelError;

/// A loaded emotion model. Implementations are shared read-only across requests.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, utterance: &str) -> Result<EmotionLabel, ModelError>;
}

/// Result of a classification pass after failure degradation.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: EmotionLabel,
    /// Set when the label is the `neutral` substitute for a failed classification.
    pub degraded: Option<String>,
}

/// Runs the classifier (if one is loaded) and folds any failure into `neutral`.
pub async fn classify_or_neutral(
    classifier: Option<&dyn EmotionClassifier>,
    utterance: &str,
) -> Classification {
    let Some(classifier) = classifier else {
        return Classification {
            label: EmotionLabel::Neutral,
            degraded: Some(ModelError::Unavailable.to_string()),
        };
    };

    match classifier.classify(utterance).await {
        Ok(label) => Classification { label, degraded: None },
        Err(e) => {
            tracing::warn!("Emotion classification failed, using neutral: {}", e);
            Classification {
                label: EmotionLabel::Neutral,
                degraded: Some(e.to_string()),
            }
        }
    }
}
