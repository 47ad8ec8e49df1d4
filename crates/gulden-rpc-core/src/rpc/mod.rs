//! JSON-RPC envelope and transport seam.
//!
//! Defines the [`Transport`] trait the dispatcher sends requests through,
//! an HTTP implementation ([`HttpTransport`]), the request/response envelope
//! types, and a test mock (`mock::MockTransport`).

mod connection;
#[cfg(test)]
pub mod mock;
mod protocol;
mod response;
mod transport;

pub use connection::{normalize_host, normalize_port, Credentials, NodeConfig};
pub use connection::{DEFAULT_HOST, DEFAULT_PORT};
pub use protocol::{strip_absent, JSON_CONTENT_TYPE};
pub use response::{NodeResponse, STATUS_SUCCESS};
pub use transport::{HttpReply, HttpRequest, HttpTransport};

pub(crate) use connection::{endpoint_url, resolve_credentials};
pub(crate) use protocol::{JsonRpcRequest, RequestIds};

use async_trait::async_trait;

use crate::error::TransportError;

/// One HTTP POST round trip.
///
/// Implementations must surface HTTP 4xx/5xx replies as
/// [`TransportError::Status`] carrying the reply, so the dispatcher can turn
/// the node's structured error body back into a [`NodeResponse`]. Any other
/// error is treated as unrecoverable and reaches the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &HttpRequest) -> Result<HttpReply, TransportError>;
}
