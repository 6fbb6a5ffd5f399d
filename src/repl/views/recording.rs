//! # Recording Views
//!
//! In-memory view implementations that keep the display state a page would
//! hold, so controller behavior can be inspected without a terminal. State is
//! shared behind a handle that stays valid after the view is moved into its
//! controller.

use super::{AnalysisView, ChatBubble, ChatView, PlaceholderHandle, ResultViewUpdate};
use crate::repl::models::RiskClass;
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(state: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Displayed contents of the result panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanelState {
    pub verdict: String,
    pub risk: Option<RiskClass>,
    pub score_text: String,
    pub reasons: Vec<String>,
    pub details: String,
    pub visible: bool,
    pub alerts: Vec<String>,
    pub submit_enabled: bool,
    /// Number of results rendered so far
    pub render_count: usize,
}

impl Default for ResultPanelState {
    fn default() -> Self {
        Self {
            verdict: String::new(),
            risk: None,
            score_text: String::new(),
            reasons: Vec::new(),
            details: String::new(),
            visible: false,
            alerts: Vec::new(),
            submit_enabled: true,
            render_count: 0,
        }
    }
}

impl ResultPanelState {
    /// True when every displayed field is empty and the panel is hidden
    pub fn is_cleared(&self) -> bool {
        self.verdict.is_empty()
            && self.risk.is_none()
            && self.score_text.is_empty()
            && self.reasons.is_empty()
            && self.details.is_empty()
            && !self.visible
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingAnalysisView {
    state: Arc<Mutex<ResultPanelState>>,
}

impl RecordingAnalysisView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current panel state
    pub fn snapshot(&self) -> ResultPanelState {
        lock(&self.state).clone()
    }
}

impl AnalysisView for RecordingAnalysisView {
    fn show_result(&mut self, update: &ResultViewUpdate) -> Result<()> {
        let mut state = lock(&self.state);
        state.verdict = update.verdict.clone();
        state.risk = Some(update.risk);
        state.score_text = update.score_text.clone();
        state.reasons = update.reasons.clone();
        state.details = update.details.clone();
        state.visible = update.visible;
        state.render_count += 1;
        Ok(())
    }

    fn clear_result(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.verdict.clear();
        state.risk = None;
        state.score_text.clear();
        state.reasons.clear();
        state.details.clear();
        state.visible = false;
        Ok(())
    }

    fn show_alert(&mut self, message: &str) -> Result<()> {
        lock(&self.state).alerts.push(message.to_string());
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<()> {
        lock(&self.state).submit_enabled = enabled;
        Ok(())
    }
}

/// One displayed element of the chat box, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    Message(ChatBubble),
    Placeholder(PlaceholderHandle),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPanelState {
    pub open: bool,
    pub entries: Vec<ChatEntry>,
}

impl ChatPanelState {
    /// Displayed bubbles, placeholders excluded
    pub fn messages(&self) -> Vec<&ChatBubble> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                ChatEntry::Message(bubble) => Some(bubble),
                ChatEntry::Placeholder(_) => None,
            })
            .collect()
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ChatEntry::Placeholder(_)))
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingChatView {
    state: Arc<Mutex<ChatPanelState>>,
}

impl RecordingChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ChatPanelState {
        lock(&self.state).clone()
    }
}

impl ChatView for RecordingChatView {
    fn set_panel_open(&mut self, open: bool) -> Result<()> {
        lock(&self.state).open = open;
        Ok(())
    }

    fn append_message(&mut self, bubble: &ChatBubble) -> Result<()> {
        lock(&self.state)
            .entries
            .push(ChatEntry::Message(bubble.clone()));
        Ok(())
    }

    fn show_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()> {
        lock(&self.state).entries.push(ChatEntry::Placeholder(handle));
        Ok(())
    }

    fn remove_placeholder(&mut self, handle: PlaceholderHandle) -> Result<()> {
        let mut state = lock(&self.state);
        let position = state
            .entries
            .iter()
            .position(|entry| *entry == ChatEntry::Placeholder(handle))
            .ok_or_else(|| anyhow!("placeholder {handle:?} is not displayed"))?;
        state.entries.remove(position);
        Ok(())
    }
}
