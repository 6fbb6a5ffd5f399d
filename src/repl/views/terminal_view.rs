//! # Terminal Views
//!
//! Line-oriented renderings of the result panel and chat panel on a
//! [`RenderStream`]. The terminal is an append-only surface, so removing the
//! typing placeholder leaves the already printed indicator line in place.

use super::{AnalysisView, BubbleStyle, ChatBubble, ChatView, PlaceholderHandle, ResultViewUpdate};
use crate::repl::io::RenderStream;
use crate::repl::models::RiskClass;
use anyhow::Result;
use crossterm::style::Color;
use std::io::Write;

/// Text shown while a chat reply is pending
pub const TYPING_INDICATOR: &str = "Assistant is typing...";

fn risk_color(risk: RiskClass) -> Color {
    match risk {
        RiskClass::High => Color::Red,
        RiskClass::Low => Color::Green,
    }
}

fn write_colored<RS: RenderStream>(stream: &mut RS, color: Color, text: &str) -> Result<()> {
    stream.set_color(color)?;
    write!(stream, "{text}")?;
    stream.reset_color()
}

/// Result panel rendered to a terminal
pub struct TerminalAnalysisView<RS: RenderStream> {
    stream: RS,
    visible: bool,
}

impl<RS: RenderStream> TerminalAnalysisView<RS> {
    pub fn new(stream: RS) -> Self {
        Self {
            stream,
            visible: false,
        }
    }
}

impl<RS: RenderStream> AnalysisView for TerminalAnalysisView<RS> {
    fn show_result(&mut self, update: &ResultViewUpdate) -> Result<()> {
        let color = risk_color(update.risk);

        writeln!(self.stream, "\n=== Analysis result ===")?;
        write!(self.stream, "Verdict: ")?;
        write_colored(&mut self.stream, color, &update.verdict)?;
        write!(self.stream, "\nScore:   ")?;
        write_colored(&mut self.stream, color, &update.score_text)?;
        writeln!(self.stream, "\nIndicators:")?;
        for reason in &update.reasons {
            writeln!(self.stream, "  - {reason}")?;
        }
        writeln!(self.stream, "Details:")?;
        writeln!(self.stream, "{}", update.details)?;
        self.stream.flush()?;

        self.visible = update.visible;
        Ok(())
    }

    fn clear_result(&mut self) -> Result<()> {
        if self.visible {
            writeln!(self.stream, "Analysis cleared.")?;
            self.stream.flush()?;
        }
        self.visible = false;
        Ok(())
    }

    fn show_alert(&mut self, message: &str) -> Result<()> {
        write_colored(&mut self.stream, Color::Yellow, &format!("! {message}"))?;
        writeln!(self.stream)?;
        self.stream.flush()?;
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<()> {
        if !enabled {
            write_colored(&mut self.stream, Color::DarkGrey, "Analyzing...")?;
            writeln!(self.stream)?;
            self.stream.flush()?;
        }
        Ok(())
    }
}

/// Chat panel rendered to a terminal
///
/// While the panel is closed, bubbles are held back and printed on open.
pub struct TerminalChatView<RS: RenderStream> {
    stream: RS,
    open: bool,
    backlog: Vec<ChatBubble>,
    placeholder: Option<PlaceholderHandle>,
}

impl<RS: RenderStream> TerminalChatView<RS> {
    pub fn new(stream: RS) -> Self {
        Self {
            stream,
            open: false,
            backlog: Vec::new(),
            placeholder: None,
        }
    }

    fn print_bubble(&mut self, bubble: &ChatBubble) -> Result<()> {
        let (label, color) = match bubble.style {
            BubbleStyle::User => ("you", Color::Blue),
            BubbleStyle::Bot => ("bot", Color::Grey),
        };
        let line = format!("[{label}] {}", bubble.text);

        if bubble.style.is_right_aligned() {
            let width = usize::from(self.stream.width());
            let padding = width.saturating_sub(line.chars().count());
            write!(self.stream, "{}", " ".repeat(padding))?;
        }
        write_colored(&mut self.stream, color, &line)?;
        writeln!(self.stream)?;
        Ok(())
    }

    fn print_placeholder(&mut self) -> Result<()> {
        write_colored(&mut self.stream, Color::DarkGrey, TYPING_INDICATOR)?;
        writeln!(self.stream)?;
        Ok(())
    }
}

impl<RS: RenderStream> ChatView for TerminalChatView<RS> {
    fn set_panel_open(&mut self, open: bool) -> Result<()> {
        if open == self.open {
            return Ok(());
        }
        self.open = open;

        if open {
            writeln!(self.stream, "--- Chat opened ---")?;
            for bubble in std::mem::take(&mut self.backlog) {
                self.print_bubble(&bubble)?;
            }
            if self.placeholder.is_some() {
                self.print_placeholder()?;
            }
        } else {
            writeln!(self.stream, "--- Chat closed ---")?;
        }
        self.stream.flush()?;
        Ok(())
    }

    fn append_message(&mut self, bubble: &ChatBubble) -> Result<()> {
        if self.open {
            self.print_bubble(bubble)?;
            self.stream.flush()?;
        } else {
            self.backlog.push(bubble.clone());
        }
        Ok(())
    }

    fn show_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()> {
        self.placeholder = Some(handle);
        if self.open {
            self.print_placeholder()?;
            self.stream.flush()?;
        }
        Ok(())
    }

    fn remove_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()> {
        if self.placeholder == Some(handle) {
            self.placeholder = None;
        }
        Ok(())
    }
}
