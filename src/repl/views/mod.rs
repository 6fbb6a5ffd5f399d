//! # Views
//!
//! Render targets injected into the controllers. The renderers are pure
//! functions; the view traits are the only place display state changes.

use anyhow::Result;

pub mod chat_renderer;
pub mod recording;
pub mod result_renderer;
pub mod terminal_view;

pub use chat_renderer::{BubbleStyle, ChatBubble};
pub use recording::{
    ChatEntry, ChatPanelState, RecordingAnalysisView, RecordingChatView, ResultPanelState,
};
pub use result_renderer::{ResultViewUpdate, NO_REASONS_FALLBACK, VERDICT_PLACEHOLDER};
pub use terminal_view::{TerminalAnalysisView, TerminalChatView, TYPING_INDICATOR};

/// Opaque identity of a displayed typing placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderHandle(u64);

impl PlaceholderHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Render target of the analysis result panel
pub trait AnalysisView: Send {
    /// Fill the panel from `update` and show it
    fn show_result(&mut self, update: &ResultViewUpdate) -> Result<()>;

    /// Empty every panel field and hide the panel
    fn clear_result(&mut self) -> Result<()>;

    /// Report a message to the user outside the panel
    fn show_alert(&mut self, message: &str) -> Result<()>;

    /// Enable or disable the submit affordance
    fn set_submit_enabled(&mut self, enabled: bool) -> Result<()>;
}

/// Render target of the chat panel
pub trait ChatView: Send {
    fn set_panel_open(&mut self, open: bool) -> Result<()>;

    /// Append a bubble after everything currently shown
    fn append_message(&mut self, bubble: &ChatBubble) -> Result<()>;

    /// Show the typing placeholder after everything currently shown
    fn show_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()>;

    fn remove_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()>;
}
