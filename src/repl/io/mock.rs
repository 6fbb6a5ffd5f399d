//! # Mock I/O Implementations for Testing
//!
//! Provides mock implementations of EventStream and RenderStream
//! for testing without terminal dependencies.

use super::{EventStream, RenderStream};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::style::Color;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock event stream for testing
///
/// Yields pre-programmed lines, then reports end of input.
pub struct MockEventStream {
    lines: VecDeque<String>,
}

impl MockEventStream {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }
}

#[async_trait]
impl EventStream for MockEventStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetColor(Color),
    ResetColor,
    Write(String),
    Flush,
}

/// Shared handle onto the commands recorded by a [`MockRenderStream`]
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    commands: Arc<Mutex<Vec<RenderCommand>>>,
}

impl RenderLog {
    fn lock(&self) -> MutexGuard<'_, Vec<RenderCommand>> {
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.lock().clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().contains(command)
    }

    /// Concatenation of every written chunk
    pub fn text(&self) -> String {
        self.lock()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, command: RenderCommand) {
        self.lock().push(command);
    }
}

/// Mock render stream for testing
///
/// Records all rendering commands; read them back through [`RenderLog`].
pub struct MockRenderStream {
    log: RenderLog,
    width: u16,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_width(80)
    }

    pub fn with_width(width: u16) -> Self {
        Self {
            log: RenderLog::default(),
            width,
        }
    }

    /// Handle that stays valid after the stream is moved into a view
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log
            .record(RenderCommand::Write(String::from_utf8_lossy(buf).into_owned()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn set_color(&mut self, color: Color) -> Result<()> {
        self.log.record(RenderCommand::SetColor(color));
        Ok(())
    }

    fn reset_color(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ResetColor);
        Ok(())
    }

    fn width(&self) -> u16 {
        self.width
    }
}
