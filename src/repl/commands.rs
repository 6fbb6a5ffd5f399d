//! # REPL Commands
//!
//! Parses one input line into a user action.

use std::path::PathBuf;

/// Line that ends paste mode
pub const PASTE_TERMINATOR: &str = ".";

pub const HELP_TEXT: &str = "\
Commands:
  analyze          paste an email, finish with a line containing only '.'
  analyze <path>   analyze the email stored in a file
  clear            clear the analysis result
  chat             toggle the chat panel (chat open / chat close)
  say <text>       send a message to the assistant
  status           show pending requests
  help             show this help
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enter paste mode
    AnalyzePaste,
    AnalyzeFile(PathBuf),
    Clear,
    ChatToggle,
    ChatOpen,
    ChatClose,
    Say(String),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match (name.to_ascii_lowercase().as_str(), rest) {
            ("", _) => Self::Empty,
            ("analyze", "") => Self::AnalyzePaste,
            ("analyze", path) => Self::AnalyzeFile(PathBuf::from(path)),
            ("clear", "") => Self::Clear,
            ("chat", "") => Self::ChatToggle,
            ("chat", "open") => Self::ChatOpen,
            ("chat", "close") => Self::ChatClose,
            ("say", text) => Self::Say(text.to_string()),
            ("status", "") => Self::Status,
            ("help", "") | ("?", "") => Self::Help,
            ("quit", "") | ("exit", "") => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_should_recognize_analyze_forms() {
        assert_eq!(Command::parse("analyze"), Command::AnalyzePaste);
        assert_eq!(
            Command::parse("  analyze  mails/invoice.eml "),
            Command::AnalyzeFile(PathBuf::from("mails/invoice.eml"))
        );
    }

    #[test]
    fn parse_should_recognize_chat_commands() {
        assert_eq!(Command::parse("chat"), Command::ChatToggle);
        assert_eq!(Command::parse("chat open"), Command::ChatOpen);
        assert_eq!(Command::parse("CHAT close"), Command::ChatClose);
        assert_eq!(
            Command::parse("say  Is this link safe?"),
            Command::Say("Is this link safe?".to_string())
        );
        assert_eq!(Command::parse("say"), Command::Say(String::new()));
    }

    #[test]
    fn parse_should_handle_misc_commands() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("status"), Command::Status);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("exit"), Command::Quit);
    }

    #[test]
    fn parse_should_report_unknown_input() {
        assert_eq!(
            Command::parse("chat sideways"),
            Command::Unknown("chat sideways".to_string())
        );
        assert_eq!(Command::parse("hello"), Command::Unknown("hello".to_string()));
    }
}
