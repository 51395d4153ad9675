use serde::{Deserialize, Serialize};

use super::canned::canned_reply;
use crate::config::FallbackConfig;
use crate::emotion::EmotionLabel;

/// What made a candidate unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackTrigger {
    Empty,
    TooShort { words: usize },
    TooLong { words: usize },
}

/// Replaces degenerate candidates with the canned reply for the emotion.
#[derive(Debug, Clone)]
pub struct FallbackSelector {
    min_words: usize,
    max_words: Option<usize>,
}

impl FallbackSelector {
    pub fn new(config: &FallbackConfig) -> Self {
        Self {
            min_words: config.min_words,
            max_words: config.max_words,
        }
    }

    pub fn check(&self, text: &str) -> Option<FallbackTrigger> {
        let words = word_count(text);
        if words == 0 {
            return Some(FallbackTrigger::Empty);
        }
        if words < self.min_words {
            return Some(FallbackTrigger::TooShort { words });
        }
        match self.max_words {
            Some(max) if words > max => Some(FallbackTrigger::TooLong { words }),
            _ => None,
        }
    }

    pub fn fallback_if_needed(&self, emotion: EmotionLabel, text: &str) -> String {
        match self.check(text) {
            Some(_) => canned_reply(emotion).to_string(),
            None => text.to_string(),
        }
    }
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new(&FallbackConfig::default())
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
