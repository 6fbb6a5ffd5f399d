//! # Controllers
//!
//! The analysis and chat controllers are independent state machines; the app
//! controller runs the event loop that feeds both.

pub mod analysis_controller;
pub mod app_controller;
pub mod chat_controller;

pub use analysis_controller::{
    AnalysisController, AnalysisError, AnalysisOutcome, AnalysisRequest, BUSY_MESSAGE,
    CONNECTIVITY_MESSAGE, EMPTY_INPUT_MESSAGE,
};
pub use app_controller::AppController;
pub use chat_controller::{ChatController, ChatRequest, CONNECTIVITY_REPLY, REPLY_FALLBACK};
