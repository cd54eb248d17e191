// UI layer: prompts (dialoguer), a spinner while requests run (indicatif)
// and the formatting of API responses for the terminal.

use crate::api;
use crate::content::card_front;
use crate::error::{MochiError, Result};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::io::IsTerminal;
use std::time::Duration;

/// Run `f` while a spinner with `message` is shown on stderr.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Pretty JSON with two-space indentation.
pub fn format_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn str_field<'a>(doc: &'a Value, key: &str) -> &'a str {
    doc.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn with_bookmark(mut lines: Vec<String>, listing: &Value) -> String {
    if let Some(bookmark) = api::bookmark(listing) {
        lines.push(format!("Next bookmark: {bookmark}"));
    }
    lines.join("\n")
}

/// Numbered deck list, `1. Spanish (abc123)`.
pub fn deck_summary(listing: &Value) -> String {
    let decks = api::docs(listing);
    if decks.is_empty() {
        return with_bookmark(vec!["No decks found.".into()], listing);
    }
    let lines = numbered_decks(decks);
    with_bookmark(lines, listing)
}

fn numbered_decks(decks: &[Value]) -> Vec<String> {
    decks
        .iter()
        .enumerate()
        .map(|(i, deck)| {
            format!(
                "{}. {} ({})",
                i + 1,
                str_field(deck, "name"),
                str_field(deck, "id")
            )
        })
        .collect()
}

/// One line per card: id and the first line of its front.
pub fn card_summary(listing: &Value) -> String {
    let cards = api::docs(listing);
    if cards.is_empty() {
        return with_bookmark(vec!["No cards found.".into()], listing);
    }
    let lines = cards
        .iter()
        .map(|card| {
            let front = card_front(str_field(card, "content"));
            let first_line = front.lines().next().unwrap_or_default();
            format!("{}  {}", str_field(card, "id"), first_line)
        })
        .collect();
    with_bookmark(lines, listing)
}

/// Parse a 1-based selection out of `count` entries into a 0-based index.
pub fn parse_selection(input: &str, count: usize) -> std::result::Result<usize, String> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("Please enter a number between 1 and {count}"))?;
    if n == 0 || n > count {
        return Err(format!("Please enter a number between 1 and {count}"));
    }
    Ok(n - 1)
}

/// Source of answers for interactive commands.
pub trait Prompter {
    /// Ask for a line of text. With `allow_empty` false an empty answer is
    /// asked again.
    fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String>;

    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on the user's terminal through dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    // dialoguer answers "" without reading when it has no terminal.
    fn ensure_terminal() -> Result<()> {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            return Ok(());
        }
        Err(MochiError::invalid_input(
            "this command prompts for input and needs an interactive terminal \
             (pass the values as flags instead, e.g. --front and --back)",
        ))
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        Self::ensure_terminal()?;
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Self::ensure_terminal()?;
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}

/// Show the numbered decks and ask for one until the answer is in range.
/// Returns the id of the chosen deck.
pub fn select_deck(prompter: &mut dyn Prompter, decks: &[Value]) -> Result<String> {
    if decks.is_empty() {
        return Err(MochiError::invalid_input("no decks available"));
    }
    for line in numbered_decks(decks) {
        println!("{line}");
    }
    loop {
        let answer = prompter.input("Select a deck", false)?;
        match parse_selection(&answer, decks.len()) {
            Ok(index) => return Ok(str_field(&decks[index], "id").to_string()),
            Err(message) => eprintln!("{message}"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedPrompter;
    use super::*;
    use serde_json::json;

    fn three_decks() -> Vec<Value> {
        vec![
            json!({ "id": "d1", "name": "Spanish" }),
            json!({ "id": "d2", "name": "Rust" }),
            json!({ "id": "d3", "name": "History" }),
        ]
    }

    #[test]
    fn test_select_deck_reprompts_until_in_range() {
        let mut prompter = ScriptedPrompter::new(&["0", "5", "two", "2"]);
        let id = select_deck(&mut prompter, &three_decks()).unwrap();
        assert_eq!(id, "d2");
        assert_eq!(prompter.asked.len(), 4);
    }

    #[test]
    fn test_select_deck_first_answer_in_range() {
        let mut prompter = ScriptedPrompter::new(&["3"]);
        assert_eq!(select_deck(&mut prompter, &three_decks()).unwrap(), "d3");
    }

    #[test]
    fn test_select_deck_without_decks_does_not_prompt() {
        let mut prompter = ScriptedPrompter::new(&["1"]);
        let err = select_deck(&mut prompter, &[]).unwrap_err();
        assert!(matches!(err, MochiError::InvalidInput { .. }));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_parse_selection_accepts_range() {
        assert_eq!(parse_selection("1", 3), Ok(0));
        assert_eq!(parse_selection(" 3 ", 3), Ok(2));
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
        assert!(parse_selection("two", 3).is_err());
        assert!(parse_selection("", 3).is_err());
    }

    #[test]
    fn test_deck_summary_numbers_decks() {
        let listing = json!({
            "docs": [
                { "id": "d1", "name": "Spanish" },
                { "id": "d2", "name": "Rust" },
            ],
            "bookmark": "g1AAAA",
        });
        assert_eq!(
            deck_summary(&listing),
            "1. Spanish (d1)\n2. Rust (d2)\nNext bookmark: g1AAAA"
        );
    }

    #[test]
    fn test_empty_summaries() {
        assert_eq!(deck_summary(&json!({ "docs": [] })), "No decks found.");
        assert_eq!(card_summary(&json!({})), "No cards found.");
    }

    #[test]
    fn test_card_summary_shows_front() {
        let listing = json!({
            "docs": [
                { "id": "c1", "content": "# Q\n---\nA" },
                { "id": "c2", "content": "# Multi\nline\n---\nback" },
            ],
        });
        assert_eq!(card_summary(&listing), "c1  Q\nc2  Multi");
    }

    #[test]
    fn test_format_json_is_indented() {
        let text = format_json(&json!({ "id": "x" })).unwrap();
        assert_eq!(text, "{\n  \"id\": \"x\"\n}");
    }
}
