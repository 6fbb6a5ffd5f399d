//! # Services
//!
//! Outbound calls to the analysis and chat endpoints.

pub mod dispatcher;
pub mod gateway;

pub use dispatcher::{RequestTicket, ServiceDispatcher, ServiceResponse};
pub use gateway::{error_message, Endpoint, Gateway, RequestError, RequestGateway};
