use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;

use super::transport::{HttpReply, HttpRequest};
use super::Transport;

/// A mock transport for testing. Replays canned replies in order and records
/// every request it receives. Once the script runs out, every further call
/// fails with [`TransportError::Unavailable`].
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: VecDeque::new(),
        }
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    /// The JSON body of the most recent request.
    pub fn last_body(&self) -> serde_json::Value {
        let requests = self.requests.lock().expect("mock lock poisoned");
        let last = requests.last().expect("no request was sent");
        serde_json::from_str(&last.body).expect("request body must be JSON")
    }
}

pub struct MockTransportBuilder {
    replies: VecDeque<Result<HttpReply, TransportError>>,
}

impl MockTransportBuilder {
    /// A reply returned as-is, whatever its status.
    pub fn reply(mut self, status: u16, body: impl Into<String>) -> Self {
        self.replies.push_back(Ok(HttpReply::new(status, body)));
        self
    }

    /// A 200 reply wrapping `result` in a JSON-RPC envelope.
    pub fn result(self, result: serde_json::Value) -> Self {
        let body = serde_json::json!({ "result": result, "error": null, "id": "mock" });
        self.reply(200, body.to_string())
    }

    /// An HTTP error status raised as a fault, the way [`HttpTransport`]
    /// reports 4xx/5xx replies.
    ///
    /// [`HttpTransport`]: super::HttpTransport
    pub fn status_fault(mut self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .push_back(Err(TransportError::Status(HttpReply::new(status, body))));
        self
    }

    /// A node-side error with the JSON-RPC error object the node sends.
    pub fn node_error(self, status: u16, code: i64, message: &str) -> Self {
        let body = serde_json::json!({
            "result": null,
            "error": { "code": code, "message": message },
            "id": "mock",
        });
        self.status_fault(status, body.to_string())
    }

    pub fn unavailable(mut self, reason: &str) -> Self {
        self.replies
            .push_back(Err(TransportError::Unavailable(reason.to_owned())));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request.clone());
        self.replies
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unavailable("no canned reply left".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{Credentials, JSON_CONTENT_TYPE};

    fn request(body: &str) -> HttpRequest {
        HttpRequest {
            url: "http://127.0.0.1:9232".into(),
            content_type: JSON_CONTENT_TYPE,
            credentials: Credentials::new("user", "pass"),
            body: body.into(),
        }
    }

    #[tokio::test]
    async fn replays_script_in_order_then_runs_dry() {
        let mock = MockTransport::builder()
            .result(serde_json::json!(1))
            .status_fault(401, "")
            .build();

        let first = mock.post(&request("{}")).await.expect("first reply");
        assert_eq!(first.status, 200);

        let second = mock.post(&request("{}")).await.expect_err("second is a fault");
        assert!(matches!(second, TransportError::Status(ref r) if r.status == 401));

        let third = mock.post(&request("{}")).await.expect_err("script is exhausted");
        assert!(matches!(third, TransportError::Unavailable(_)));

        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn last_body_parses_recorded_request() {
        let mock = MockTransport::builder().result(serde_json::json!(null)).build();
        mock.post(&request(r#"{"method":"getinfo"}"#))
            .await
            .expect("reply");
        assert_eq!(mock.last_body()["method"], "getinfo");
    }
}
