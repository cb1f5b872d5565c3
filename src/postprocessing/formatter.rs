//! Cleans and trims the raw LLM response.

use regex::Regex;
use std::sync::OnceLock;

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // An info string on its own line, or an `html`/`json` tag glued to the content.
    RE.get_or_init(|| {
        Regex::new(r"^```(?:[\w+-]*[ \t]*\r?\n|(?i:html|json)\b)?").expect("leading fence pattern")
    })
}

fn trailing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\r?\n)?[ \t]*```$").expect("trailing fence pattern"))
}

fn closing_fence_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*```[ \t]*\r?$").expect("closing fence pattern"))
}

/// Removes a markdown code fence wrapping the whole response, then trims.
/// When the response opens with a fence, the last fence line closes it and
/// any chatter after it is dropped. Other fences in the text are left alone.
pub fn clean(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = match leading_fence().find(trimmed) {
        Some(open) => {
            let rest = &trimmed[open.end()..];
            match closing_fence_line().find_iter(rest).last() {
                Some(close) => &rest[..close.start()],
                None => rest,
            }
        }
        None => trimmed,
    };
    trailing_fence().replace(body, "").trim().to_string()
}
