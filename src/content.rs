//! Card body format used by the simplified commands.
//!
//! A two-sided card is stored as a markdown heading for the front, a `---`
//! line, then the back:
//!
//! ```text
//! # What is the capital of France?
//! ---
//! Paris
//! ```

pub const SEPARATOR: &str = "---";

/// Serialize a front/back pair into card content.
pub fn card_content(front: &str, back: &str) -> String {
    format!("# {front}\n{SEPARATOR}\n{back}")
}

/// Recover the front of a card: everything before the first separator with
/// the heading marker stripped.
pub fn card_front(content: &str) -> String {
    let front = content.split(SEPARATOR).next().unwrap_or_default();
    front.trim().trim_start_matches('#').trim().to_string()
}

/// Everything after the first separator, or an empty string.
pub fn card_back(content: &str) -> String {
    content
        .split_once(SEPARATOR)
        .map(|(_, back)| back.trim().to_string())
        .unwrap_or_default()
}
