//! # Analysis Controller
//!
//! Owns the paste → analyze → render/clear flow. At most one analysis
//! request is in flight per controller; submission and completion are
//! separate callbacks so the event loop stays responsive while waiting.

use crate::repl::models::AnalysisResult;
use crate::repl::services::{RequestError, RequestTicket};
use crate::repl::views::{result_renderer, AnalysisView};
use serde_json::{json, Value};
use thiserror::Error;

/// Alert shown when the pasted text is blank
pub const EMPTY_INPUT_MESSAGE: &str = "Please paste an email to analyze.";

/// Alert shown for transport or payload failures
pub const CONNECTIVITY_MESSAGE: &str = "Could not reach the analysis service. Please try again.";

/// Alert shown when a second submission is attempted while one is pending
pub const BUSY_MESSAGE: &str = "An analysis is already in progress.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("{}", BUSY_MESSAGE)]
    Busy,
    #[error(transparent)]
    View(#[from] anyhow::Error),
}

/// A submission ready to be handed to the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub ticket: RequestTicket,
    pub payload: Value,
}

/// How a completion was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Rendered,
    ApplicationError,
    ConnectivityError,
    /// The result belonged to a submission made before the last `clear`
    Discarded,
}

pub struct AnalysisController<V: AnalysisView> {
    view: V,
    in_flight: Option<u64>,
    generation: u64,
    discard_stale_results: bool,
}

impl<V: AnalysisView> AnalysisController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            in_flight: None,
            generation: 0,
            discard_stale_results: true,
        }
    }

    /// Choose whether results resolving after `clear` are still rendered
    pub fn with_discard_stale_results(mut self, discard: bool) -> Self {
        self.discard_stale_results = discard;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate input and mark a request as in flight
    ///
    /// The caller must deliver the request's outcome to [`Self::complete`].
    pub fn submit(&mut self, raw_text: &str) -> Result<AnalysisRequest, AnalysisError> {
        let email = raw_text.trim();
        if email.is_empty() {
            tracing::debug!("Rejected empty analysis input");
            self.view.show_alert(EMPTY_INPUT_MESSAGE)?;
            return Err(AnalysisError::EmptyInput);
        }
        if let Some(generation) = self.in_flight {
            tracing::warn!("Rejected analysis submission while generation {generation} is pending");
            self.view.show_alert(BUSY_MESSAGE)?;
            return Err(AnalysisError::Busy);
        }

        // Nothing is dispatched if the view refuses, so the flag stays clear
        self.view.set_submit_enabled(false)?;
        self.in_flight = Some(self.generation);
        tracing::info!(
            "Submitting analysis (generation {}, {} bytes)",
            self.generation,
            email.len()
        );

        Ok(AnalysisRequest {
            ticket: RequestTicket::Analysis {
                generation: self.generation,
            },
            payload: json!({ "email": email }),
        })
    }

    /// Apply the outcome of the in-flight request
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Value, RequestError>,
    ) -> anyhow::Result<AnalysisOutcome> {
        // Released before anything below can fail
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        } else {
            tracing::warn!("Completion for unknown analysis generation {generation}");
        }
        self.view.set_submit_enabled(true)?;

        if self.discard_stale_results && generation != self.generation {
            tracing::info!(
                "Discarding analysis from generation {generation} (current {})",
                self.generation
            );
            return Ok(AnalysisOutcome::Discarded);
        }

        match outcome.and_then(AnalysisResult::from_payload) {
            Ok(result) => {
                let update = result_renderer::render(&result);
                tracing::debug!("Rendering analysis result: {:?}", update.risk);
                self.view.show_result(&update)?;
                Ok(AnalysisOutcome::Rendered)
            }
            Err(RequestError::Application(message)) => {
                tracing::info!("Analysis service reported: {message}");
                self.view.show_alert(&message)?;
                Ok(AnalysisOutcome::ApplicationError)
            }
            Err(e) => {
                tracing::warn!("Analysis request failed: {e}");
                self.view.show_alert(CONNECTIVITY_MESSAGE)?;
                Ok(AnalysisOutcome::ConnectivityError)
            }
        }
    }

    /// Empty and hide the result panel; pending requests are left running
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.generation += 1;
        tracing::debug!("Cleared analysis panel (generation now {})", self.generation);
        self.view.clear_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::RiskClass;
    use crate::repl::views::{RecordingAnalysisView, ResultViewUpdate, NO_REASONS_FALLBACK};

    fn controller() -> (AnalysisController<RecordingAnalysisView>, RecordingAnalysisView) {
        let view = RecordingAnalysisView::new();
        (AnalysisController::new(view.clone()), view)
    }

    fn generation_of(request: &AnalysisRequest) -> u64 {
        match request.ticket {
            RequestTicket::Analysis { generation } => generation,
            other => panic!("unexpected ticket {other:?}"),
        }
    }

    #[test]
    fn submit_should_reject_whitespace_input() {
        let (mut controller, view) = controller();

        let err = controller.submit("  \n\t ").unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyInput));
        assert!(!controller.is_in_flight());
        assert_eq!(view.snapshot().alerts, vec![EMPTY_INPUT_MESSAGE]);
    }

    #[test]
    fn submit_should_send_trimmed_email_and_disable_submit() {
        let (mut controller, view) = controller();

        let request = controller.submit("  From: a@b.xyz\n\nhello  ").unwrap();

        assert_eq!(request.payload, json!({ "email": "From: a@b.xyz\n\nhello" }));
        assert!(controller.is_in_flight());
        assert!(!view.snapshot().submit_enabled);
    }

    #[test]
    fn submit_should_reject_second_request_while_pending() {
        let (mut controller, view) = controller();
        let first = controller.submit("first").unwrap();

        assert!(matches!(controller.submit("second"), Err(AnalysisError::Busy)));
        assert_eq!(view.snapshot().alerts, vec![BUSY_MESSAGE]);

        controller
            .complete(generation_of(&first), Ok(json!({ "score": 1 })))
            .unwrap();
        assert!(controller.submit("third").is_ok());
    }

    #[test]
    fn complete_should_render_result_and_release_flag() {
        let (mut controller, view) = controller();
        let request = controller.submit("email").unwrap();

        let outcome = controller
            .complete(
                generation_of(&request),
                Ok(json!({ "score": 72, "reasons": ["spoofed sender", "urgent language"] })),
            )
            .unwrap();

        assert_eq!(outcome, AnalysisOutcome::Rendered);
        assert!(!controller.is_in_flight());
        let state = view.snapshot();
        assert!(state.visible);
        assert!(state.submit_enabled);
        assert_eq!(state.risk, Some(RiskClass::High));
        assert_eq!(state.score_text, "72 / 100");
        assert_eq!(state.reasons, vec!["spoofed sender", "urgent language"]);
    }

    #[test]
    fn complete_should_alert_application_error_and_keep_panel() {
        let (mut controller, view) = controller();
        let request = controller.submit("email").unwrap();
        controller
            .complete(generation_of(&request), Ok(json!({ "score": 10, "reasons": [] })))
            .unwrap();
        let before = view.snapshot();

        let request = controller.submit("another").unwrap();
        let outcome = controller
            .complete(
                generation_of(&request),
                Err(RequestError::Application("invalid email".into())),
            )
            .unwrap();

        assert_eq!(outcome, AnalysisOutcome::ApplicationError);
        let after = view.snapshot();
        assert_eq!(after.alerts, vec!["invalid email"]);
        assert!(after.visible);
        assert_eq!(after.reasons, before.reasons);
        assert_eq!(after.reasons, vec![NO_REASONS_FALLBACK]);
        assert_eq!(after.render_count, 1);
        assert!(!controller.is_in_flight());
    }

    #[test]
    fn complete_should_show_generic_message_for_connectivity_failures() {
        for error in [
            RequestError::Network("connection refused".into()),
            RequestError::Malformed("not an object".into()),
        ] {
            let (mut controller, view) = controller();
            let request = controller.submit("email").unwrap();

            let outcome = controller.complete(generation_of(&request), Err(error)).unwrap();

            assert_eq!(outcome, AnalysisOutcome::ConnectivityError);
            assert_eq!(view.snapshot().alerts, vec![CONNECTIVITY_MESSAGE]);
            assert!(!controller.is_in_flight());
        }
    }

    #[test]
    fn complete_should_treat_wrong_shape_as_connectivity_failure() {
        let (mut controller, view) = controller();
        let request = controller.submit("email").unwrap();

        let outcome = controller
            .complete(generation_of(&request), Ok(json!({ "score": "seventy" })))
            .unwrap();

        assert_eq!(outcome, AnalysisOutcome::ConnectivityError);
        assert!(!view.snapshot().visible);
    }

    #[test]
    fn clear_should_reset_panel_idempotently() {
        let (mut controller, view) = controller();
        let request = controller.submit("email").unwrap();
        controller
            .complete(generation_of(&request), Ok(json!({ "score": 90, "details": {} })))
            .unwrap();

        controller.clear().unwrap();
        assert!(view.snapshot().is_cleared());
        controller.clear().unwrap();
        assert!(view.snapshot().is_cleared());
    }

    #[test]
    fn clear_should_discard_result_resolving_afterwards() {
        let (mut controller, view) = controller();
        let request = controller.submit("email").unwrap();

        controller.clear().unwrap();
        assert!(controller.is_in_flight());

        let outcome = controller
            .complete(generation_of(&request), Ok(json!({ "score": 90 })))
            .unwrap();

        assert_eq!(outcome, AnalysisOutcome::Discarded);
        assert!(view.snapshot().is_cleared());
        assert!(!controller.is_in_flight());
    }

    /// A view whose submit control cannot be disabled
    struct StuckSubmitView;

    impl AnalysisView for StuckSubmitView {
        fn show_result(&mut self, _update: &ResultViewUpdate) -> anyhow::Result<()> {
            Ok(())
        }

        fn clear_result(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn show_alert(&mut self, _message: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn set_submit_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
            if enabled {
                Ok(())
            } else {
                Err(anyhow::anyhow!("submit control unavailable"))
            }
        }
    }

    #[test]
    fn submit_should_leave_controller_idle_when_view_fails() {
        let mut controller = AnalysisController::new(StuckSubmitView);

        let err = controller.submit("email").unwrap_err();

        assert!(matches!(err, AnalysisError::View(_)));
        assert!(!controller.is_in_flight());
        assert!(!matches!(controller.submit("email"), Err(AnalysisError::Busy)));
    }

    #[test]
    fn clear_should_allow_late_result_when_stale_results_are_kept() {
        let view = RecordingAnalysisView::new();
        let mut controller =
            AnalysisController::new(view.clone()).with_discard_stale_results(false);
        let request = controller.submit("email").unwrap();

        controller.clear().unwrap();
        let outcome = controller
            .complete(generation_of(&request), Ok(json!({ "score": 90 })))
            .unwrap();

        assert_eq!(outcome, AnalysisOutcome::Rendered);
        assert!(view.snapshot().visible);
    }
}
