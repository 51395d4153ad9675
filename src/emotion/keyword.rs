use async_trait::async_trait;

use super::classifier::EmotionClassifier;
use super::types::EmotionLabel;
use crate::error::ModelError;

/// Lexical emotion detector. No model weights; used offline or when no
/// classification endpoint is configured.
///
/// Rules are checked in order, first hit wins:
/// - "happy", "good" ... -> Joy
/// - "sad" ... -> Sadness
/// - "angry" ... -> Anger
/// - fear / surprise / disgust cues
/// - otherwise Neutral
pub struct KeywordClassifier;

const RULES: &[(EmotionLabel, &[&str])] = &[
    (EmotionLabel::Joy, &["happy", "good", "glad", "great", "excited", "wonderful", "love"]),
    (EmotionLabel::Sadness, &["sad", "down", "lonely", "depressed", "miserable", "cry", "crying"]),
    (EmotionLabel::Anger, &["angry", "mad", "furious", "annoyed", "hate", "pissed"]),
    (EmotionLabel::Fear, &["scared", "afraid", "anxious", "nervous", "terrified", "worried"]),
    (EmotionLabel::Surprise, &["wow", "surprised", "unexpected", "shocked", "unbelievable"]),
    (EmotionLabel::Disgust, &["gross", "disgusting", "disgusted", "yuck", "nasty"]),
];

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, utterance: &str) -> EmotionLabel {
        let lower = utterance.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        for (label, cues) in RULES {
            if words.iter().any(|w| cues.contains(w)) {
                return *label;
            }
        }
        EmotionLabel::Neutral
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmotionClassifier for KeywordClassifier {
    async fn classify(&self, utterance: &str) -> Result<EmotionLabel, ModelError> {
        Ok(self.detect(utterance))
    }
}
