//! # Application Controller
//!
//! Runs the single-threaded event loop: user input lines and network
//! completions are the only callbacks, and each one is handled to completion
//! before the next is taken.

use crate::config::AppConfig;
use crate::repl::commands::{Command, HELP_TEXT, PASTE_TERMINATOR};
use crate::repl::controllers::{AnalysisController, AnalysisError, ChatController};
use crate::repl::io::{EventStream, RenderStream, StdinEventStream, TerminalRenderStream};
use crate::repl::services::{
    Gateway, RequestGateway, RequestTicket, ServiceDispatcher, ServiceResponse,
};
use crate::repl::views::{AnalysisView, ChatView, TerminalAnalysisView, TerminalChatView};
use anyhow::Result;
use std::io::{Stdout, Write};
use std::path::Path;
use std::sync::Arc;

/// Application controller wired to the real terminal
pub type TerminalAppController = AppController<
    StdinEventStream,
    TerminalAnalysisView<TerminalRenderStream<Stdout>>,
    TerminalChatView<TerminalRenderStream<Stdout>>,
    TerminalRenderStream<Stdout>,
>;

pub struct AppController<ES, AV, CV, RS>
where
    ES: EventStream,
    AV: AnalysisView,
    CV: ChatView,
    RS: RenderStream,
{
    analysis: AnalysisController<AV>,
    chat: ChatController<CV>,
    dispatcher: ServiceDispatcher,
    event_stream: ES,
    console: RS,
    /// Lines collected while in paste mode
    paste_buffer: Option<Vec<String>>,
    input_closed: bool,
    should_quit: bool,
}

impl TerminalAppController {
    /// Create the controller for an interactive terminal session
    pub fn new(config: &AppConfig) -> Result<Self> {
        let gateway = RequestGateway::new(config.base_url().clone(), config.request_timeout())?;
        tracing::info!("Using service at {}", gateway.base_url());

        Ok(Self::with_io_streams(
            config,
            Arc::new(gateway),
            StdinEventStream::new(),
            TerminalAnalysisView::new(TerminalRenderStream::new()),
            TerminalChatView::new(TerminalRenderStream::new()),
            TerminalRenderStream::new(),
        ))
    }
}

impl<ES, AV, CV, RS> AppController<ES, AV, CV, RS>
where
    ES: EventStream,
    AV: AnalysisView,
    CV: ChatView,
    RS: RenderStream,
{
    /// Create a controller with injected gateway, input and views
    pub fn with_io_streams(
        config: &AppConfig,
        gateway: Arc<dyn Gateway>,
        event_stream: ES,
        analysis_view: AV,
        chat_view: CV,
        console: RS,
    ) -> Self {
        Self {
            analysis: AnalysisController::new(analysis_view)
                .with_discard_stale_results(config.discard_stale_results()),
            chat: ChatController::new(chat_view),
            dispatcher: ServiceDispatcher::new(gateway),
            event_stream,
            console,
            paste_buffer: None,
            input_closed: false,
            should_quit: false,
        }
    }

    pub fn analysis(&self) -> &AnalysisController<AV> {
        &self.analysis
    }

    pub fn chat(&self) -> &ChatController<CV> {
        &self.chat
    }

    pub fn is_pasting(&self) -> bool {
        self.paste_buffer.is_some()
    }

    /// Run until `quit`, or until input ends and every request has resolved
    pub async fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.input_closed {
                if self.dispatcher.outstanding() == 0 {
                    break;
                }
                match self.dispatcher.recv().await {
                    Some(response) => self.handle_response(response)?,
                    None => break,
                }
                continue;
            }

            let has_outstanding = self.dispatcher.outstanding() > 0;
            tokio::select! {
                line = self.event_stream.next_line() => match line? {
                    Some(line) => self.handle_line(&line).await?,
                    None => self.handle_end_of_input()?,
                },
                Some(response) = self.dispatcher.recv(), if has_outstanding => {
                    self.handle_response(response)?;
                }
            }
        }

        tracing::debug!(
            "Event loop finished with {} request(s) outstanding",
            self.dispatcher.outstanding()
        );
        Ok(())
    }

    /// Process one user input line
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        if let Some(buffer) = self.paste_buffer.as_mut() {
            if line.trim() == PASTE_TERMINATOR {
                let text = self.paste_buffer.take().unwrap_or_default().join("\n");
                self.submit_analysis(&text)?;
            } else {
                buffer.push(line.to_string());
            }
            return Ok(());
        }

        let command = Command::parse(line);
        tracing::debug!("Command: {command:?}");
        match command {
            Command::AnalyzePaste => {
                self.paste_buffer = Some(Vec::new());
                self.print(&format!(
                    "Paste the email, then finish with a line containing only '{PASTE_TERMINATOR}'"
                ))?;
            }
            Command::AnalyzeFile(path) => self.analyze_file(&path).await?,
            Command::Clear => self.analysis.clear()?,
            Command::ChatToggle => self.chat.toggle()?,
            Command::ChatOpen => self.chat.open()?,
            Command::ChatClose => self.chat.close()?,
            Command::Say(text) => {
                if let Some(request) = self.chat.send_message(&text)? {
                    self.dispatcher.dispatch(request.ticket, request.payload);
                }
            }
            Command::Status => self.print_status()?,
            Command::Help => self.print(HELP_TEXT)?,
            Command::Quit => self.should_quit = true,
            Command::Empty => {}
            Command::Unknown(input) => {
                self.print(&format!("Unknown command '{input}'. Type 'help' for commands."))?;
            }
        }
        Ok(())
    }

    /// Route a completion to the controller that issued it
    pub fn handle_response(&mut self, response: ServiceResponse) -> Result<()> {
        match response.ticket {
            RequestTicket::Analysis { generation } => {
                let outcome = self.analysis.complete(generation, response.outcome)?;
                tracing::debug!("Analysis completion applied: {outcome:?}");
            }
            RequestTicket::Chat { seq } => self.chat.complete(seq, response.outcome)?,
        }
        Ok(())
    }

    fn handle_end_of_input(&mut self) -> Result<()> {
        tracing::debug!("Input closed");
        self.input_closed = true;
        // An unterminated paste still counts as a submission
        if let Some(lines) = self.paste_buffer.take() {
            self.submit_analysis(&lines.join("\n"))?;
        }
        Ok(())
    }

    async fn analyze_file(&mut self, path: &Path) -> Result<()> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => self.submit_analysis(&text),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
                self.print(&format!("Cannot read '{}': {e}", path.display()))
            }
        }
    }

    fn submit_analysis(&mut self, text: &str) -> Result<()> {
        match self.analysis.submit(text) {
            Ok(request) => {
                self.dispatcher.dispatch(request.ticket, request.payload);
                Ok(())
            }
            Err(AnalysisError::View(e)) => Err(e),
            // Already reported to the user through the view
            Err(e) => {
                tracing::debug!("Analysis submission rejected: {e}");
                Ok(())
            }
        }
    }

    fn print_status(&mut self) -> Result<()> {
        let analysis = if self.analysis.is_in_flight() {
            "in progress"
        } else {
            "idle"
        };
        let panel = if self.chat.is_open() { "open" } else { "closed" };
        let status = format!(
            "Analysis: {analysis}\nChat panel: {panel}, {} repl{} pending",
            self.chat.outstanding(),
            if self.chat.outstanding() == 1 { "y" } else { "ies" }
        );
        self.print(&status)
    }

    fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.console, "{text}")?;
        self.console.flush()?;
        Ok(())
    }
}
