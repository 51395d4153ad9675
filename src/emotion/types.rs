use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownEmotion;

/// Discrete affect detected in a user utterance.
/// Serialized lower-case, matching the labels the classifiers emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    #[default]
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Joy,
        EmotionLabel::Sadness,
        EmotionLabel::Anger,
        EmotionLabel::Fear,
        EmotionLabel::Surprise,
        EmotionLabel::Disgust,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joy => "joy",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Neutral => "neutral",
        }
    }

    /// Maps a raw classifier label onto the enumeration.
    /// Unknown labels collapse to `Neutral` so a model/label-set drift never aborts a request.
    pub fn from_model_label(raw: &str) -> Self {
        raw.parse().unwrap_or(EmotionLabel::Neutral)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Aliases cover the wording of the older lexical detector ("happy", "sad", "angry")
        match s.trim().to_lowercase().as_str() {
            "joy" | "happy" | "happiness" => Ok(EmotionLabel::Joy),
            "sadness" | "sad" => Ok(EmotionLabel::Sadness),
            "anger" | "angry" => Ok(EmotionLabel::Anger),
            "fear" | "afraid" | "scared" => Ok(EmotionLabel::Fear),
            "surprise" | "surprised" => Ok(EmotionLabel::Surprise),
            "disgust" | "disgusted" => Ok(EmotionLabel::Disgust),
            "neutral" => Ok(EmotionLabel::Neutral),
            other => Err(UnknownEmotion(other.to_string())),
        }
    }
}
