//! # Result Renderer
//!
//! Pure mapping from an [`AnalysisResult`] to the instructions a result panel
//! needs: texts, style classification and visibility.

use crate::repl::models::{AnalysisResult, RiskClass};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};

/// Verdict shown when the service omits one
pub const VERDICT_PLACEHOLDER: &str = "No verdict";

/// Single reason shown when the service lists none
pub const NO_REASONS_FALLBACK: &str = "No specific indicators found.";

/// Everything a result panel needs to display one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultViewUpdate {
    pub verdict: String,
    pub risk: RiskClass,
    pub score_text: String,
    pub reasons: Vec<String>,
    pub details: String,
    pub visible: bool,
}

impl ResultViewUpdate {
    pub fn is_high_risk(&self) -> bool {
        self.risk == RiskClass::High
    }
}

pub fn render(result: &AnalysisResult) -> ResultViewUpdate {
    let score = result.score_or_default();

    let reasons = match &result.reasons {
        Some(reasons) if !reasons.is_empty() => reasons.clone(),
        _ => vec![NO_REASONS_FALLBACK.to_string()],
    };

    ResultViewUpdate {
        verdict: result
            .verdict
            .clone()
            .unwrap_or_else(|| VERDICT_PLACEHOLDER.to_string()),
        risk: RiskClass::from_score(&score),
        score_text: format!("{score} / 100"),
        reasons,
        details: format_details(result.details.as_ref().unwrap_or(&Value::Null)),
        visible: true,
    }
}

/// Serialize details as JSON indented by two spaces
pub fn format_details(details: &Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    match details.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        // Serializing a Value into memory cannot fail in practice
        Err(_) => details.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_from(payload: Value) -> AnalysisResult {
        AnalysisResult::from_payload(payload).unwrap()
    }

    #[test]
    fn render_should_classify_high_risk_example() {
        let update = render(&result_from(json!({
            "score": 72,
            "reasons": ["spoofed sender", "urgent language"]
        })));

        assert!(update.is_high_risk());
        assert_eq!(update.score_text, "72 / 100");
        assert_eq!(update.reasons, vec!["spoofed sender", "urgent language"]);
        assert!(update.visible);
    }

    #[test]
    fn render_should_treat_threshold_as_high_risk() {
        assert_eq!(render(&result_from(json!({ "score": 50 }))).risk, RiskClass::High);
        assert_eq!(render(&result_from(json!({ "score": 49 }))).risk, RiskClass::Low);
    }

    #[test]
    fn render_should_default_missing_score_to_low_zero() {
        let update = render(&AnalysisResult::default());
        assert_eq!(update.risk, RiskClass::Low);
        assert_eq!(update.score_text, "0 / 100");
        assert_eq!(update.verdict, VERDICT_PLACEHOLDER);
    }

    #[test]
    fn render_should_use_fallback_reason_for_empty_list() {
        let update = render(&result_from(json!({ "reasons": [] })));
        assert_eq!(update.reasons, vec![NO_REASONS_FALLBACK]);

        let update = render(&AnalysisResult::default());
        assert_eq!(update.reasons, vec![NO_REASONS_FALLBACK]);
    }

    #[test]
    fn render_should_ignore_legacy_color_hint() {
        let update = render(&result_from(json!({ "score": 10, "color": "red" })));
        assert_eq!(update.risk, RiskClass::Low);
    }

    #[test]
    fn render_should_display_score_as_received() {
        let update = render(&result_from(json!({ "score": 130 })));
        assert_eq!(update.score_text, "130 / 100");
    }

    #[test]
    fn format_details_should_indent_two_spaces() {
        let text = format_details(&json!({ "links": ["http://a.xyz"] }));
        assert_eq!(text, "{\n  \"links\": [\n    \"http://a.xyz\"\n  ]\n}");
    }

    #[test]
    fn format_details_should_render_absent_details_as_null() {
        assert_eq!(render(&AnalysisResult::default()).details, "null");
    }
}
