use regex::Regex;
use std::sync::OnceLock;

fn punctuation_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]{2,}").expect("punctuation pattern is valid"))
}

fn word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Normalizes generation artifacts. Pure and idempotent.
///
/// - `!!`, `?!?`, `...` -> `.`
/// - `the the cat` -> `the cat` (case-sensitive, whitespace-separated repeats only)
pub fn sanitize(raw: &str) -> String {
    let collapsed = punctuation_run().replace_all(raw, ".");
    collapse_repeated_words(&collapsed).trim().to_string()
}

fn collapse_repeated_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut previous: Option<&str> = None;

    for m in word().find_iter(text) {
        let gap = &text[last_end..m.start()];
        let is_repeat = previous == Some(m.as_str())
            && !gap.is_empty()
            && gap.chars().all(char::is_whitespace);

        // A dropped repeat takes its leading gap with it
        if !is_repeat {
            out.push_str(gap);
            out.push_str(m.as_str());
        }
        previous = Some(m.as_str());
        last_end = m.end();
    }

    out.push_str(&text[last_end..]);
    out
}
