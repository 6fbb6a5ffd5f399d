//! # Terminal I/O Implementations
//!
//! Production implementations of the I/O abstractions.
//! All crossterm calls are isolated to this module.

use super::{EventStream, RenderStream};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::execute;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads user input lines from stdin
pub struct StdinEventStream {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinEventStream {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinEventStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStream for StdinEventStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// Fallback when the terminal size cannot be queried (e.g. output is piped)
const DEFAULT_WIDTH: u16 = 80;

/// Renders to the actual terminal
pub struct TerminalRenderStream<W: Write> {
    writer: W,
}

impl TerminalRenderStream<io::Stdout> {
    /// Create a new terminal render stream using stdout
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    /// Create a terminal render stream with custom writer
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(text) = std::str::from_utf8(buf) {
            execute!(self.writer, Print(text))?;
            Ok(buf.len())
        } else {
            self.writer.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn set_color(&mut self, color: Color) -> Result<()> {
        execute!(self.writer, SetForegroundColor(color)).map_err(anyhow::Error::from)
    }

    fn reset_color(&mut self) -> Result<()> {
        execute!(self.writer, ResetColor).map_err(anyhow::Error::from)
    }

    fn width(&self) -> u16 {
        crossterm::terminal::size()
            .map(|(width, _)| width)
            .unwrap_or(DEFAULT_WIDTH)
    }
}
