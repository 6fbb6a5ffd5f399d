//! # PhishLine - Terminal Front-End for an Email Phishing Analyzer
//!
//! Submits pasted emails to an analysis service, renders the verdict, and
//! drives an assistant chat panel beside it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   lines    ┌───────────────┐  tickets  ┌───────────────────┐
//! │ EventStream │───────────▶│ AppController │──────────▶│ ServiceDispatcher │
//! └─────────────┘            │  (event loop) │◀──────────│  RequestGateway   │
//!                            └───────┬───────┘ responses └───────────────────┘
//!                     ┌──────────────┴──────────────┐
//!                     ▼                             ▼
//!           ┌────────────────────┐        ┌────────────────┐
//!           │ AnalysisController │        │ ChatController │
//!           │  ResultRenderer    │        │  ChatRenderer  │
//!           └─────────┬──────────┘        └───────┬────────┘
//!                     ▼                           ▼
//!               AnalysisView                   ChatView
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
