//! Pure text helpers around the generation call: input capping before the request,
//! cleanup of what comes back.

use std::collections::HashSet;

use crate::prompt::TURN_SEPARATOR;

/// Control tokens that must never reach the user.
pub const SPECIAL_TOKENS: &[&str] = &[TURN_SEPARATOR, "<s>", "</s>", "<pad>", "<unk>"];

/// Keeps the newest `max_tokens` whitespace tokens of the prompt.
/// The trailing open slot (`Bot: `) survives truncation.
pub fn truncate_front(prompt: &str, max_tokens: usize) -> String {
    let tokens: Vec<&str> = prompt.split_whitespace().collect();
    if tokens.len() <= max_tokens {
        return prompt.to_string();
    }

    let mut kept = tokens[tokens.len() - max_tokens..].join(" ");
    if prompt.ends_with(char::is_whitespace) {
        kept.push(' ');
    }
    kept
}

/// Removes control tokens and normalizes whitespace.
pub fn strip_special_tokens(text: &str) -> String {
    let mut out = text.to_string();
    for token in SPECIAL_TOKENS {
        out = out.replace(token, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops the prompt if the model echoed it ahead of the continuation.
/// Both sides are compared after special-token stripping.
pub fn strip_prompt_echo(decoded: &str, prompt: &str) -> String {
    let clean_prompt = strip_special_tokens(prompt);
    let clean_decoded = strip_special_tokens(decoded);

    match clean_decoded.strip_prefix(clean_prompt.as_str()) {
        Some(rest) if !clean_prompt.is_empty() => rest.trim().to_string(),
        _ => clean_decoded,
    }
}

/// Cuts the text right before the word that would complete an already-seen n-gram.
/// `n == 0` disables the rule.
pub fn cut_repeated_ngrams(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if n == 0 || words.len() < n {
        return words.join(" ");
    }

    let mut seen: HashSet<&[&str]> = HashSet::new();
    for start in 0..=words.len() - n {
        let gram = &words[start..start + n];
        if !seen.insert(gram) {
            return words[..start + n - 1].join(" ");
        }
    }
    words.join(" ")
}

/// Full decode path for one raw completion.
pub fn decode_completion(raw: &str, prompt: &str, no_repeat_ngram_size: usize) -> String {
    let continuation = strip_prompt_echo(raw, prompt);
    cut_repeated_ngrams(&continuation, no_repeat_ngram_size)
}
