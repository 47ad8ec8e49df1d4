use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(serde::Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub(crate) method: &'a str,
    pub(crate) params: Vec<serde_json::Value>,
    pub(crate) id: String,
}

/// Drop absent (`null`) parameters, keeping the order of the rest.
///
/// Optional arguments the caller left out are passed as `null`.
pub fn strip_absent(params: Vec<serde_json::Value>) -> Vec<serde_json::Value> {
    params.into_iter().filter(|p| !p.is_null()).collect()
}

/// Generator of correlation ids, unique for the lifetime of the process.
pub(crate) struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicU64::new(initial_request_id()),
        }
    }

    pub(crate) fn next(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("request_id_{n:016x}")
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
