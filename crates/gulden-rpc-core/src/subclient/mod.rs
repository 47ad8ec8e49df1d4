//! Grouped node commands.
//!
//! Each sub-client shares the client's [`Dispatcher`](crate::client::Dispatcher)
//! and maps one node command to one method: send, require success, convert
//! the result.

mod accounts;
mod blockchain;
mod control;
mod network;
mod wallet;

pub use accounts::AccountsClient;
pub use blockchain::BlockChainClient;
pub use control::ControlClient;
pub use network::NetworkClient;
pub use wallet::{SendManyOptions, SendOptions, WalletClient, ALL_ACCOUNTS};

use bitcoin::SignedAmount;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;

// ==============================================================================
// Result Conversion
// ==============================================================================

/// Result as text: strings verbatim, `null` as empty, anything else as JSON.
pub(crate) fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Result as a truth value. `0`, `"0"`, `"false"` and empty text are false.
pub(crate) fn flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Deserialize an object result. A missing result is read as `{}` so the
/// record's field defaults apply.
pub(crate) fn record<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, CoreError> {
    let value = if value.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        value
    };
    serde_json::from_value(value)
        .map_err(|e| CoreError::InvalidResponse(format!("invalid {method} result: {e}")))
}

/// Deserialize a list result. A missing result is an empty list.
pub(crate) fn list<T: DeserializeOwned>(method: &str, value: Value) -> Result<Vec<T>, CoreError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| CoreError::InvalidResponse(format!("invalid {method} result: {e}")))
}

pub(crate) fn integer(method: &str, value: &Value) -> Result<u64, CoreError> {
    value
        .as_u64()
        .ok_or_else(|| CoreError::InvalidResponse(format!("invalid {method} result: {value}")))
}

pub(crate) fn decimal(method: &str, value: &Value) -> Result<f64, CoreError> {
    value
        .as_f64()
        .ok_or_else(|| CoreError::InvalidResponse(format!("invalid {method} result: {value}")))
}

/// A coin amount the node reports as a decimal number of NLG.
pub(crate) fn amount(method: &str, value: &Value) -> Result<SignedAmount, CoreError> {
    let nlg = decimal(method, value)?;
    SignedAmount::from_btc(nlg)
        .map_err(|e| CoreError::InvalidResponse(format!("invalid {method} amount {nlg}: {e}")))
}
