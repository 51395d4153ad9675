use serde::{Deserialize, Serialize};

use super::canned::canned_reply;
use crate::emotion::EmotionLabel;

// English-only lexicons over the lower-cased text.
// Single keywords match at a word start ("great" hits "greatest", "happy" misses "unhappy");
// multi-word phrases match whole.

const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad", "bad", "terrible", "awful", "horrible", "angry", "upset", "hate", "sorry",
    "unfortunately", "worse", "worst", "cry", "crying", "depressed", "miserable", "hurt",
    "lonely", "unhappy", "disappointed",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "happy", "glad", "great", "wonderful", "awesome", "amazing", "fantastic", "excited",
    "love", "yay", "funny", "good", "nice", "congratulations", "congrats", "excellent",
    "delighted", "cool",
];

const SELF_FOCUSED_PHRASES: &[&str] = &[
    "i feel", "i'm feeling", "i am feeling", "i'm happy", "i am happy", "i'm sad", "i am sad",
    "i'm so", "i am so", "i'm excited", "i am excited", "me too", "makes me", "i feel happy",
    "i feel sad", "i love it", "my day",
];

/// Why a candidate was rejected. Carries no user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    Negative,
    Positive,
    SelfFocused,
    MissingPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Reject(RejectReason),
}

/// Lexical cues found in a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cues {
    pub negative: bool,
    pub positive: bool,
    pub self_focused: bool,
}

impl Cues {
    pub fn scan(text: &str) -> Self {
        let normalized = normalize(text);
        Self {
            negative: contains_any(&normalized, NEGATIVE_KEYWORDS),
            positive: contains_any(&normalized, POSITIVE_KEYWORDS),
            self_focused: contains_any(&normalized, SELF_FOCUSED_PHRASES),
        }
    }
}

/// Lower-cases, unifies apostrophes and joins words with single spaces, padded at both ends.
fn normalize(text: &str) -> String {
    let lower = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect();
    format!(" {} ", words.join(" "))
}

fn contains_any(normalized: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|needle| {
            if needle.contains(' ') {
                normalized.contains(&format!(" {} ", needle))
            } else {
                normalized.contains(&format!(" {}", needle))
            }
        })
}

/// Cheap lexical check that a reply does not contradict the detected mood.
/// Known to miss mismatches that avoid the keyword lists.
pub struct ConsistencyGuard;

impl ConsistencyGuard {
    /// Rules per emotion, first match wins.
    pub fn review(emotion: EmotionLabel, text: &str) -> Verdict {
        let cues = Cues::scan(text);

        match emotion {
            EmotionLabel::Joy => {
                if cues.negative {
                    Verdict::Reject(RejectReason::Negative)
                } else if cues.self_focused {
                    Verdict::Reject(RejectReason::SelfFocused)
                } else if !cues.positive {
                    Verdict::Reject(RejectReason::MissingPositive)
                } else {
                    Verdict::Pass
                }
            }
            EmotionLabel::Sadness => {
                if cues.positive {
                    Verdict::Reject(RejectReason::Positive)
                } else if cues.self_focused {
                    Verdict::Reject(RejectReason::SelfFocused)
                } else {
                    Verdict::Pass
                }
            }
            EmotionLabel::Surprise => {
                if cues.negative {
                    Verdict::Reject(RejectReason::Negative)
                } else if cues.self_focused {
                    Verdict::Reject(RejectReason::SelfFocused)
                } else {
                    Verdict::Pass
                }
            }
            _ => Verdict::Pass,
        }
    }

    /// Returns the text unchanged, or the canned reply for `emotion` if it was rejected.
    pub fn guard(emotion: EmotionLabel, text: &str) -> String {
        match Self::review(emotion, text) {
            Verdict::Pass => text.to_string(),
            Verdict::Reject(_) => canned_reply(emotion).to_string(),
        }
    }
}
