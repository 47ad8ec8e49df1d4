use serde_json::Value;

use crate::error::CoreError;

use super::transport::HttpReply;

/// HTTP status of a successful round trip.
pub const STATUS_SUCCESS: u16 = 200;

// ==============================================================================
// NodeResponse
// ==============================================================================

/// Normalized outcome of one request/response cycle.
///
/// Built from every reply the node sends, including 4xx/5xx ones, so callers
/// always get a value to inspect. A body that is not valid JSON leaves the
/// result empty (`Value::Null`) and the error empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeResponse {
    status: u16,
    result: Value,
    error: String,
}

impl NodeResponse {
    pub fn new(status: u16, result: Value, error: impl Into<String>) -> Self {
        Self {
            status,
            result,
            error: error.into(),
        }
    }

    pub fn from_reply(reply: &HttpReply) -> Self {
        let decoded = serde_json::from_str::<Value>(&reply.body).unwrap_or(Value::Null);
        let Value::Object(mut envelope) = decoded else {
            return Self::new(reply.status, Value::Null, "");
        };

        let error = match envelope.get("error") {
            Some(Value::Object(err)) => match err.get("message") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
            },
            _ => String::new(),
        };
        let result = envelope.remove("result").unwrap_or(Value::Null);

        Self::new(reply.status, result, error)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Message of the node's error object, empty when there was none.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// The raw `result` member, `Value::Null` when absent.
    pub fn result(&self) -> &Value {
        &self.result
    }

    pub fn into_result(self) -> Value {
        self.result
    }

    /// The result, unless it is empty (null, `""`, `[]` or `{}`).
    pub fn body(&self) -> Option<&Value> {
        if is_empty(&self.result) {
            None
        } else {
            Some(&self.result)
        }
    }

    pub fn is_successful(&self) -> bool {
        self.error.is_empty() && self.status == STATUS_SUCCESS
    }

    /// Pass the response through when successful, else fail with
    /// [`CoreError::RemoteCommand`] carrying the node's message.
    pub fn require_success(self) -> Result<Self, CoreError> {
        if self.is_successful() {
            Ok(self)
        } else {
            Err(CoreError::RemoteCommand {
                status: self.status,
                message: self.error,
            })
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
