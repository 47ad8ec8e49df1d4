use crate::rpc::HttpReply;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The round trip completed but the node reported failure, either with a
    /// JSON-RPC error object or a non-200 status.
    #[error("node command failed (HTTP {status}): {message}")]
    RemoteCommand { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("invalid node response: {0}")]
    InvalidResponse(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Failures raised by the HTTP transport underneath the dispatcher.
///
/// Only [`TransportError::Status`] is recoverable: the node answers most
/// failed commands with a non-2xx status and a structured JSON body, so the
/// dispatcher turns that reply back into an ordinary response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP status {}", .0.status)]
    Status(HttpReply),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a base-58 string cannot be decoded into an address buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base-58 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("address too long: decoded value exceeds {width} bytes")]
    Overflow { width: usize },
}
