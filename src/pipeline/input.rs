use crate::error::InputError;

pub const MAX_UTTERANCE_CHARS: usize = 500;

/// Caller-side precondition check. `Responder::respond` assumes it already passed.
/// Returns the trimmed utterance.
pub fn validate_utterance(raw: &str) -> Result<&str, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let chars = trimmed.chars().count();
    if chars > MAX_UTTERANCE_CHARS {
        return Err(InputError::TooLong {
            max: MAX_UTTERANCE_CHARS,
            actual: chars,
        });
    }
    Ok(trimmed)
}
