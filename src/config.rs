use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::memory::HISTORY_CAPACITY;

/// Sampling and length limits for the generation model.
/// Fixed per process; never mutated by a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Hard cap on prompt tokens; older tokens are dropped first.
    pub max_input_tokens: usize,
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub no_repeat_ngram_size: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_input_tokens: 128,
            max_new_tokens: 60,
            temperature: 0.75,
            top_p: 0.92,
            no_repeat_ngram_size: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `url: None` selects the offline keyword classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub min_words: usize,
    /// `None` disables the too-long rule.
    pub max_words: Option<usize>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            min_words: 3,
            max_words: Some(15),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub generation: GenerationParams,
    pub generator: GeneratorConfig,
    pub classifier: ClassifierConfig,
    pub fallback: FallbackConfig,
    /// Narrows the per-session window; clamped to 1..=10.
    pub history_capacity: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            generation: GenerationParams::default(),
            generator: GeneratorConfig::default(),
            classifier: ClassifierConfig::default(),
            fallback: FallbackConfig::default(),
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

impl ResponderConfig {
    /// Reads a JSON config file. Absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
