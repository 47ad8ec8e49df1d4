use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::trace;

use crate::error::TransportError;

use super::connection::Credentials;
use super::Transport;

/// A fully built JSON-RPC POST, ready for the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub content_type: &'static str,
    pub credentials: Credentials,
    pub body: String,
}

/// Status and raw body of an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ==============================================================================
// HttpTransport
// ==============================================================================

/// `reqwest` transport with pooled connections.
///
/// Replies with a 4xx or 5xx status are returned as
/// [`TransportError::Status`]; the body is read first so nothing the node
/// said is lost.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Wrap a preconfigured client (custom TLS roots, proxies, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .header(header::CONTENT_TYPE, request.content_type)
            .basic_auth(
                &request.credentials.username,
                Some(&request.credentials.password),
            )
            .body(request.body.clone())
            .send()
            .await?;
        let status = response.status();
        let failed = status.is_client_error() || status.is_server_error();
        // An unreadable error body still leaves the status to report.
        let body = if failed {
            response.text().await.unwrap_or_default()
        } else {
            response.text().await?
        };
        trace!(%status, body_len = body.len(), "http reply");

        let reply = HttpReply {
            status: status.as_u16(),
            body,
        };
        if failed {
            return Err(TransportError::Status(reply));
        }
        Ok(reply)
    }
}
