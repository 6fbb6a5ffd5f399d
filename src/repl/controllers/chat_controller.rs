//! # Chat Controller
//!
//! Owns the chat panel state and the ordered message log. Sends may overlap;
//! replies are buffered by sequence number and appended strictly in the
//! order their requests were issued.

use crate::repl::models::{ChatMessage, ChatReply};
use crate::repl::services::{RequestError, RequestTicket};
use crate::repl::views::{chat_renderer, ChatView, PlaceholderHandle};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Bot text used when the service replies without content
pub const REPLY_FALLBACK: &str = "No response from bot.";

/// Bot text used when the service could not be reached
pub const CONNECTIVITY_REPLY: &str = "Error connecting to chatbot.";

/// A send ready to be handed to the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub ticket: RequestTicket,
    pub payload: Value,
}

pub struct ChatController<V: ChatView> {
    view: V,
    panel_open: bool,
    log: Vec<ChatMessage>,
    pending_placeholder: Option<PlaceholderHandle>,
    next_seq: u64,
    /// Sequence number of the oldest send whose reply is not in the log yet
    next_to_append: u64,
    /// Replies that resolved ahead of an earlier send
    resolved: BTreeMap<u64, ChatMessage>,
    next_placeholder_id: u64,
}

impl<V: ChatView> ChatController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            panel_open: false,
            log: Vec::new(),
            pending_placeholder: None,
            next_seq: 0,
            next_to_append: 0,
            resolved: BTreeMap::new(),
            next_placeholder_id: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel_open
    }

    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn pending_placeholder(&self) -> Option<PlaceholderHandle> {
        self.pending_placeholder
    }

    /// Number of sends whose reply has not been appended yet
    pub fn outstanding(&self) -> usize {
        (self.next_seq - self.next_to_append) as usize
    }

    pub fn toggle(&mut self) -> anyhow::Result<()> {
        self.set_open(!self.panel_open)
    }

    pub fn open(&mut self) -> anyhow::Result<()> {
        self.set_open(true)
    }

    pub fn close(&mut self) -> anyhow::Result<()> {
        self.set_open(false)
    }

    fn set_open(&mut self, open: bool) -> anyhow::Result<()> {
        tracing::debug!("Chat panel open: {open}");
        self.panel_open = open;
        self.view.set_panel_open(open)
    }

    /// Echo the user's message and prepare its request
    ///
    /// Blank input is ignored and yields `None`.
    pub fn send_message(&mut self, raw_text: &str) -> anyhow::Result<Option<ChatRequest>> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.take_placeholder()?;
        self.append(ChatMessage::user(text))?;
        self.show_placeholder()?;

        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::info!("Sending chat message {seq}");

        Ok(Some(ChatRequest {
            ticket: RequestTicket::Chat { seq },
            payload: json!({ "message": text }),
        }))
    }

    /// Record the outcome of send `seq` and append every reply now in order
    pub fn complete(&mut self, seq: u64, outcome: Result<Value, RequestError>) -> anyhow::Result<()> {
        if seq < self.next_to_append || seq >= self.next_seq || self.resolved.contains_key(&seq) {
            tracing::warn!("Ignoring completion for unknown chat send {seq}");
            return Ok(());
        }
        self.resolved.insert(seq, reply_message(outcome));

        if !self.resolved.contains_key(&self.next_to_append) {
            tracing::debug!(
                "Chat reply {seq} buffered behind {}",
                self.next_to_append
            );
            return Ok(());
        }

        self.take_placeholder()?;
        while let Some(message) = self.resolved.remove(&self.next_to_append) {
            self.append(message)?;
            self.next_to_append += 1;
        }
        if self.outstanding() > 0 {
            self.show_placeholder()?;
        }
        Ok(())
    }

    fn append(&mut self, message: ChatMessage) -> anyhow::Result<()> {
        self.view.append_message(&chat_renderer::render(&message))?;
        self.log.push(message);
        Ok(())
    }

    fn show_placeholder(&mut self) -> anyhow::Result<()> {
        let handle = PlaceholderHandle::new(self.next_placeholder_id);
        self.next_placeholder_id += 1;
        self.view.show_placeholder(handle)?;
        self.pending_placeholder = Some(handle);
        Ok(())
    }

    fn take_placeholder(&mut self) -> anyhow::Result<()> {
        match self.pending_placeholder.take() {
            Some(handle) => self.view.remove_placeholder(handle),
            None => Ok(()),
        }
    }
}

fn reply_message(outcome: Result<Value, RequestError>) -> ChatMessage {
    match outcome.and_then(ChatReply::from_payload) {
        Ok(reply) => ChatMessage::bot(reply.text().unwrap_or(REPLY_FALLBACK)),
        Err(RequestError::Application(message)) => {
            tracing::info!("Chat service reported: {message}");
            ChatMessage::bot(format!("Error: {message}"))
        }
        Err(e) => {
            tracing::warn!("Chat request failed: {e}");
            ChatMessage::bot(CONNECTIVITY_REPLY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::views::{BubbleStyle, ChatEntry, RecordingChatView};

    fn controller() -> (ChatController<RecordingChatView>, RecordingChatView) {
        let view = RecordingChatView::new();
        (ChatController::new(view.clone()), view)
    }

    fn seq_of(request: &ChatRequest) -> u64 {
        match request.ticket {
            RequestTicket::Chat { seq } => seq,
            other => panic!("unexpected ticket {other:?}"),
        }
    }

    fn texts(controller: &ChatController<RecordingChatView>) -> Vec<String> {
        controller
            .log()
            .iter()
            .map(|m| format!("{:?}:{}", m.sender, m.text))
            .collect()
    }

    #[test]
    fn toggle_should_flip_panel_state() {
        let (mut controller, view) = controller();
        assert!(!controller.is_open());

        controller.toggle().unwrap();
        assert!(controller.is_open());
        assert!(view.snapshot().open);

        controller.toggle().unwrap();
        assert!(!controller.is_open());

        controller.open().unwrap();
        controller.open().unwrap();
        assert!(controller.is_open());
        controller.close().unwrap();
        assert!(!view.snapshot().open);
    }

    #[test]
    fn send_message_should_ignore_blank_text() {
        let (mut controller, view) = controller();

        assert_eq!(controller.send_message("   ").unwrap(), None);
        assert!(controller.log().is_empty());
        assert!(view.snapshot().entries.is_empty());
    }

    #[test]
    fn send_message_should_echo_user_and_show_one_placeholder() {
        let (mut controller, view) = controller();

        let request = controller.send_message(" is this phishing? ").unwrap().unwrap();

        assert_eq!(request.payload, json!({ "message": "is this phishing?" }));
        assert_eq!(texts(&controller), vec!["User:is this phishing?"]);
        let state = view.snapshot();
        assert_eq!(state.placeholder_count(), 1);
        assert!(matches!(state.entries.last(), Some(ChatEntry::Placeholder(_))));
        assert!(controller.pending_placeholder().is_some());
    }

    #[test]
    fn complete_should_replace_placeholder_with_reply() {
        let (mut controller, view) = controller();
        let request = controller.send_message("hello").unwrap().unwrap();

        controller
            .complete(seq_of(&request), Ok(json!({ "reply": "Hi there" })))
            .unwrap();

        assert_eq!(texts(&controller), vec!["User:hello", "Bot:Hi there"]);
        let state = view.snapshot();
        assert_eq!(state.placeholder_count(), 0);
        assert_eq!(state.messages()[1].style, BubbleStyle::Bot);
        assert!(controller.pending_placeholder().is_none());
    }

    #[test]
    fn complete_should_use_fallback_for_empty_reply() {
        let (mut controller, view) = controller();
        let request = controller.send_message("hello").unwrap().unwrap();

        controller.complete(seq_of(&request), Ok(json!({}))).unwrap();

        assert_eq!(view.snapshot().messages()[1].text, REPLY_FALLBACK);
    }

    #[test]
    fn complete_should_distinguish_failure_kinds() {
        let (mut controller, _view) = controller();
        let first = controller.send_message("one").unwrap().unwrap();
        let second = controller.send_message("two").unwrap().unwrap();
        let third = controller.send_message("three").unwrap().unwrap();

        controller
            .complete(seq_of(&first), Err(RequestError::Application("quota exceeded".into())))
            .unwrap();
        controller
            .complete(seq_of(&second), Err(RequestError::Network("refused".into())))
            .unwrap();
        controller
            .complete(seq_of(&third), Ok(json!({ "reply": ["not", "text"] })))
            .unwrap();

        let log = texts(&controller);
        assert_eq!(log[3], "Bot:Error: quota exceeded");
        assert_eq!(log[4], format!("Bot:{CONNECTIVITY_REPLY}"));
        assert_eq!(log[5], format!("Bot:{CONNECTIVITY_REPLY}"));
    }

    #[test]
    fn complete_should_append_replies_in_send_order() {
        let (mut controller, view) = controller();
        let m1 = controller.send_message("M1").unwrap().unwrap();
        let m2 = controller.send_message("M2").unwrap().unwrap();
        assert_eq!(view.snapshot().placeholder_count(), 1);

        controller
            .complete(seq_of(&m2), Ok(json!({ "reply": "reply-to-M2" })))
            .unwrap();
        assert_eq!(texts(&controller), vec!["User:M1", "User:M2"]);
        assert_eq!(view.snapshot().placeholder_count(), 1);

        controller
            .complete(seq_of(&m1), Ok(json!({ "reply": "reply-to-M1" })))
            .unwrap();
        assert_eq!(
            texts(&controller),
            vec!["User:M1", "User:M2", "Bot:reply-to-M1", "Bot:reply-to-M2"]
        );
        let state = view.snapshot();
        assert_eq!(state.placeholder_count(), 0);
        assert_eq!(state.messages().len(), 4);
        assert_eq!(controller.outstanding(), 0);
    }

    #[test]
    fn complete_should_keep_placeholder_last_while_replies_pending() {
        let (mut controller, view) = controller();
        let m1 = controller.send_message("M1").unwrap().unwrap();
        let _m2 = controller.send_message("M2").unwrap().unwrap();

        controller
            .complete(seq_of(&m1), Ok(json!({ "reply": "r1" })))
            .unwrap();

        let state = view.snapshot();
        assert_eq!(state.placeholder_count(), 1);
        assert!(matches!(state.entries.last(), Some(ChatEntry::Placeholder(_))));
        assert_eq!(controller.outstanding(), 1);
    }

    #[test]
    fn complete_should_ignore_unknown_or_repeated_sequence() {
        let (mut controller, _view) = controller();
        let request = controller.send_message("hello").unwrap().unwrap();

        controller.complete(42, Ok(json!({ "reply": "ghost" }))).unwrap();
        controller
            .complete(seq_of(&request), Ok(json!({ "reply": "real" })))
            .unwrap();
        controller
            .complete(seq_of(&request), Ok(json!({ "reply": "again" })))
            .unwrap();

        assert_eq!(texts(&controller), vec!["User:hello", "Bot:real"]);
    }

    #[test]
    fn closing_panel_should_not_touch_log() {
        let (mut controller, _view) = controller();
        let request = controller.send_message("hello").unwrap().unwrap();
        controller.close().unwrap();
        controller
            .complete(seq_of(&request), Ok(json!({ "reply": "hi" })))
            .unwrap();

        assert_eq!(controller.log().len(), 2);
    }
}
