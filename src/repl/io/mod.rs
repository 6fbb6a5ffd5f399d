//! # I/O Abstraction Layer
//!
//! Provides trait abstractions for input lines and styled output so the
//! controllers and views can be driven without a real terminal.
//!
//! ## Architecture
//!
//! ```text
//! Production:  AppController ──▶ StdinEventStream     ──▶ tokio::io::stdin()
//!              TerminalViews ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     AppController ──▶ MockEventStream      ──▶ VecDeque<String>
//!              TerminalViews ──▶ MockRenderStream     ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use async_trait::async_trait;
use crossterm::style::Color;
use std::io::Write;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand, RenderLog};
pub use terminal::{StdinEventStream, TerminalRenderStream};

/// Input line source
///
/// Each line is one user action. `None` means the input is exhausted.
#[async_trait]
pub trait EventStream: Send {
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// Styled output sink
pub trait RenderStream: Write + Send {
    /// Set the foreground color for subsequent writes
    fn set_color(&mut self, color: Color) -> Result<()>;

    /// Restore the default colors
    fn reset_color(&mut self) -> Result<()>;

    /// Terminal width in columns
    fn width(&self) -> u16;
}
