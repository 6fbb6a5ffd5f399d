//! # REPL Architecture
//!
//! Controllers own the state machines, views own the display, services own
//! the network. Everything meets in the [`AppController`] event loop.

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

// Re-export core types
pub use commands::Command;
pub use controllers::app_controller::TerminalAppController;
pub use controllers::{AnalysisController, AppController, ChatController};
pub use models::{AnalysisResult, ChatMessage, RiskClass, Sender};
pub use services::{Endpoint, Gateway, RequestError, RequestGateway};
pub use views::{AnalysisView, ChatView};
