use crate::emotion::EmotionLabel;
use crate::memory::ConversationTurn;

/// Turn delimiter, matching the EOS convention the dialogue model was trained with.
pub const TURN_SEPARATOR: &str = "<|endoftext|>";

/// Only the newest turns are replayed into the prompt.
pub const PROMPT_HISTORY_TURNS: usize = 2;

const DEFAULT_INSTRUCTION: &str = "Respond naturally and kindly in one short sentence.";

/// Instruction prefixed to the prompt, selected by the detected emotion.
pub fn instruction_for(emotion: EmotionLabel) -> &'static str {
    match emotion {
        EmotionLabel::Joy => "Respond warmly and share the user's happiness in one short, upbeat sentence.",
        EmotionLabel::Sadness => "Respond gently with comfort and empathy in one short sentence. Do not talk about yourself.",
        EmotionLabel::Anger => "Respond calmly and acknowledge the user's frustration in one short sentence.",
        EmotionLabel::Fear => "Respond reassuringly and help the user feel safe in one short sentence.",
        EmotionLabel::Surprise => "Respond with curiosity about what surprised the user in one short sentence.",
        EmotionLabel::Disgust => "Respond understandingly about what bothered the user in one short sentence.",
        EmotionLabel::Neutral => DEFAULT_INSTRUCTION,
    }
}

/// Looks up an instruction for a raw label string, for labels that may not have
/// been normalized yet. Unmapped labels get the default instruction.
pub fn instruction_for_label(label: &str) -> &'static str {
    label
        .parse::<EmotionLabel>()
        .map(instruction_for)
        .unwrap_or(DEFAULT_INSTRUCTION)
}

/// Renders `instruction`, the last two turns (oldest first) and the live utterance,
/// ending on an open `Bot: ` slot for the model to complete.
pub fn build_prompt(emotion: EmotionLabel, utterance: &str, history: &[ConversationTurn]) -> String {
    let mut prompt = String::from(instruction_for(emotion));
    prompt.push(' ');

    let skip = history.len().saturating_sub(PROMPT_HISTORY_TURNS);
    for turn in &history[skip..] {
        prompt.push_str(&format!(
            "User: {} {sep} Bot: {} {sep} ",
            turn.user,
            turn.bot,
            sep = TURN_SEPARATOR
        ));
    }

    prompt.push_str(&format!("User: {} {} Bot: ", utterance, TURN_SEPARATOR));
    prompt
}
