use crate::emotion::EmotionLabel;

/// Returned when no generation model could be loaded.
pub const UNAVAILABLE_REPLY: &str = "Chatbot model is unavailable";

/// Returned when a single generation call fails.
pub const INFERENCE_FAILURE_REPLY: &str = "Sorry, something went wrong...";

/// Hand-authored reply for each emotion.
/// Every entry is 3..=15 words and passes the consistency guard for its own label.
pub fn canned_reply(emotion: EmotionLabel) -> &'static str {
    match emotion {
        EmotionLabel::Joy => "That's wonderful to hear! Tell me more about what made your day great.",
        EmotionLabel::Sadness => "I'm sorry you're feeling this way. I'm here for you.",
        EmotionLabel::Anger => "Take a deep breath. It's okay to feel angry sometimes.",
        EmotionLabel::Fear => "That sounds scary. You're not alone, and we can take it slowly.",
        EmotionLabel::Surprise => "Wow, that's unexpected! What happened next?",
        EmotionLabel::Disgust => "That does sound unpleasant. Do you want to talk about it?",
        EmotionLabel::Neutral => "I see. Tell me more about it.",
    }
}

/// Canned reply for a raw label; anything unrecognised gets the neutral reply.
pub fn canned_reply_for_label(label: &str) -> &'static str {
    label
        .parse::<EmotionLabel>()
        .map(canned_reply)
        .unwrap_or_else(|_| canned_reply(EmotionLabel::Neutral))
}
