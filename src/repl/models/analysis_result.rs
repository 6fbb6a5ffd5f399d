//! Analysis result model
//!
//! The payload returned by `POST /analyze`. Every field is optional on the
//! wire; the defaults applied here are the only schema the client enforces.

use crate::repl::services::RequestError;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;

/// Score at or above which an email is classified as high risk
pub const HIGH_RISK_THRESHOLD: i64 = 50;

/// Decoded `/analyze` success payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub verdict: Option<String>,
    pub score: Option<Score>,
    /// Legacy server-side colour hint, superseded by [`RiskClass`]
    pub color: Option<String>,
    pub reasons: Option<Vec<String>>,
    pub details: Option<Value>,
}

impl AnalysisResult {
    /// Decode a gateway payload, mapping shape violations to `Malformed`
    pub fn from_payload(payload: Value) -> Result<Self, RequestError> {
        serde_json::from_value(payload)
            .map_err(|e| RequestError::Malformed(format!("unexpected analysis payload: {e}")))
    }

    /// Score with the absent-means-zero default applied
    pub fn score_or_default(&self) -> Score {
        self.score.clone().unwrap_or_default()
    }

    pub fn risk(&self) -> RiskClass {
        RiskClass::from_score(&self.score_or_default())
    }
}

/// Score exactly as the service sent it
///
/// Values are never clamped or narrowed. Fractional scores display truncated
/// toward zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Score(Number);

impl Score {
    fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(Number::from(0))
    }
}

impl From<i64> for Score {
    fn from(score: i64) -> Self {
        Self(Number::from(score))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_i64() || self.0.is_u64() {
            return write!(f, "{}", self.0);
        }
        let truncated = self.as_f64().trunc();
        // -0.5 truncates to -0.0
        if truncated == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{truncated}")
        }
    }
}

/// Two-class risk classification derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    High,
    Low,
}

impl RiskClass {
    pub fn from_score(score: &Score) -> Self {
        if score.as_f64() >= HIGH_RISK_THRESHOLD as f64 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Style token applied to the verdict and score text
    pub fn style_token(&self) -> &'static str {
        match self {
            Self::High => "risk-high",
            Self::Low => "risk-low",
        }
    }
}
