//! Chat mode rendering.

use crate::config::ResolvedConfig;
use crate::session::{Message, Sender};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    crate::status!(
        "{} {} - type a question and press Enter",
        Style::header("querychat"),
        Style::version(format!("v{VERSION}"))
    );
    crate::status!();
}

pub fn print_goodbye() {
    crate::status!("{}", Style::success("Goodbye!"));
}

/// Renders one transcript entry: a speaker label, then the text indented.
pub fn format_message(message: &Message) -> String {
    let label = match message.sender() {
        Sender::User => Style::user("you"),
        Sender::Assistant => Style::assistant("assistant"),
    };

    let mut out = label;
    for line in message.text().lines() {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

pub fn print_message(message: &Message) {
    println!("{}", format_message(message));
    println!();
}

pub fn print_transcript(transcript: &[Message]) {
    for message in transcript {
        print_message(message);
    }
}

pub fn print_config(config: &ResolvedConfig) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::value(&config.endpoint)
    );
    println!(
        "  {}  {}",
        Style::label("chat path"),
        Style::value(&config.chat_path)
    );
    let timeout = config
        .timeout
        .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));
    println!("  {}    {}", Style::label("timeout"), Style::secondary(timeout));
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    println!(
        "  {}   {}",
        Style::command("/config"),
        Style::secondary("Show the backend this session talks to")
    );
    println!(
        "  {}     {}",
        Style::command("/help"),
        Style::secondary("Show this help")
    );
    println!(
        "  {}  {}",
        Style::command("/history"),
        Style::secondary("Print the whole conversation")
    );
    println!(
        "  {}     {}",
        Style::command("/quit"),
        Style::secondary("Exit chat mode")
    );
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_indents_every_line() {
        let rendered = format_message(&Message::assistant("first\nsecond"));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("assistant"));
        assert_eq!(lines[1], "  first");
        assert_eq!(lines[2], "  second");
    }

    #[test]
    fn test_format_message_labels_user() {
        let rendered = format_message(&Message::user("Hello"));
        assert!(rendered.contains("you"));
        assert!(rendered.ends_with("\n  Hello"));
    }
}
