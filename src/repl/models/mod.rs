//! # Models
//!
//! Plain data decoded from the services or owned by the controllers.

pub mod analysis_result;
pub mod chat_message;

pub use analysis_result::{AnalysisResult, RiskClass, Score, HIGH_RISK_THRESHOLD};
pub use chat_message::{ChatMessage, ChatReply, Sender};
