//! # Service Dispatcher
//!
//! Runs gateway calls as background tasks and hands their completions back
//! to the event loop through a channel, so controllers only ever change state
//! inside a discrete callback.

use super::gateway::{Endpoint, Gateway, RequestError};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifies which controller a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTicket {
    /// Analysis submission with its generation number
    Analysis { generation: u64 },
    /// Chat send with its sequence number
    Chat { seq: u64 },
}

impl RequestTicket {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Analysis { .. } => Endpoint::Analyze,
            Self::Chat { .. } => Endpoint::Chat,
        }
    }
}

/// A resolved gateway call
#[derive(Debug)]
pub struct ServiceResponse {
    pub ticket: RequestTicket,
    pub outcome: Result<Value, RequestError>,
}

/// Background executor for gateway calls
pub struct ServiceDispatcher {
    gateway: Arc<dyn Gateway>,
    response_sender: mpsc::UnboundedSender<ServiceResponse>,
    response_receiver: mpsc::UnboundedReceiver<ServiceResponse>,
    outstanding: usize,
}

impl ServiceDispatcher {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (response_sender, response_receiver) = mpsc::unbounded_channel();
        Self {
            gateway,
            response_sender,
            response_receiver,
            outstanding: 0,
        }
    }

    /// Number of dispatched calls whose completion has not been received yet
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Issue a call in the background
    ///
    /// A completion is always delivered, including when the call panics.
    pub fn dispatch(&mut self, ticket: RequestTicket, payload: Value) {
        let gateway = Arc::clone(&self.gateway);
        let sender = self.response_sender.clone();
        self.outstanding += 1;
        tracing::debug!("Dispatching {ticket:?}");

        tokio::spawn(async move {
            let call =
                tokio::spawn(async move { gateway.send(ticket.endpoint(), payload).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Request task for {ticket:?} failed: {e}");
                    Err(RequestError::Network(format!("request task failed: {e}")))
                }
            };
            // Receiver is gone only when the app is shutting down
            let _ = sender.send(ServiceResponse { ticket, outcome });
        });
    }

    /// Wait for the next completion
    pub async fn recv(&mut self) -> Option<ServiceResponse> {
        let response = self.response_receiver.recv().await?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(response)
    }
}
