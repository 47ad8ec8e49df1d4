//! Shared test helpers for `gulden-rpc-core` unit tests.
//!
//! Known-good address vectors, canned node records, and a client wired to a
//! [`MockTransport`] so sub-client tests only script the replies.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::GuldenClient;
use crate::rpc::mock::{MockTransport, MockTransportBuilder};
use crate::rpc::NodeConfig;

// ==============================================================================
// Address Vectors
// ==============================================================================

/// A mainnet address with a valid checksum.
pub const VALID_ADDRESS: &str = "Ga1GEKzjGdXBs43R8JsWP7V8kQUR2nV1NH";

/// [`VALID_ADDRESS`] decoded: version `0x26`, 20-byte hash, 4-byte checksum.
pub const VALID_ADDRESS_BYTES: [u8; 25] = [
    0x26, 0xb1, 0x46, 0x4b, 0xc2, 0x67, 0x83, 0xb8, 0xf5, 0x27, 0xd3, 0xe5, 0x95, 0x8e, 0xe1,
    0x8a, 0x05, 0x30, 0x8c, 0xa5, 0x3f, 0x9f, 0x14, 0xc5, 0x22,
];

// ==============================================================================
// Client
// ==============================================================================

/// A client over the scripted transport. The port is out of range on
/// purpose, so the endpoint falls back to `http://127.0.0.1:9232`.
pub fn mock_client(builder: MockTransportBuilder) -> (GuldenClient, Arc<MockTransport>) {
    let mock = Arc::new(builder.build());
    let config = NodeConfig::new("user", "pass")
        .with_host("127.0.0.1")
        .with_port(100_000);
    let client = GuldenClient::with_transport(&config, mock.clone()).expect("mock client");
    (client, mock)
}

// ==============================================================================
// Node Records
// ==============================================================================

/// One `listaccounts` entry.
pub fn account_json(label: &str) -> Value {
    json!({
        "UUID": format!("{label}-0000-4000-8000-000000000000"),
        "label": label,
        "type": "HD",
        "HDindex": 0
    })
}

/// A verbose `getblock` result with a single transaction.
pub fn block_json() -> Value {
    json!({
        "hash": "000000000000150d2cfc5ab5b8e4e9a21ca0b6a1e8c6e4b66a2d3c3dd0bfb6f6",
        "confirmations": 3,
        "strippedsize": 350,
        "size": 350,
        "weight": 1400,
        "height": 598598,
        "version": 536870912,
        "versionHex": "20000000",
        "merkleroot": "6f1c4fbd1ed4b8ed3c1f9b5f8a7b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b",
        "tx": ["6f1c4fbd1ed4b8ed3c1f9b5f8a7b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b"],
        "time": 1505665060,
        "mediantime": 1505664829,
        "nonce": 0,
        "bits": "1b1bd0c4",
        "difficulty": 2412.1938,
        "chainwork": "00000000000000000000000000000000000000000000000000b4f5a8e1c2d3e4",
        "previousblockhash": "00000000000003b1f8ec1c6b22c0a1d5c9e1f2a3b4c5d6e7f8091a2b3c4d5e6f"
    })
}

/// One `getpeerinfo` entry.
pub fn peer_json(id: u8, inbound: bool, conntime: u64) -> Value {
    json!({
        "id": id,
        "addr": format!("10.0.0.{id}:9231"),
        "addrlocal": "10.0.0.254:9231",
        "services": "0000000000000005",
        "relaytxes": true,
        "conntime": conntime,
        "timeoffset": 0,
        "pingtime": 0.05,
        "minping": 0.04,
        "version": 70014,
        "subver": "/Gulden:2.0.0/",
        "inbound": inbound
    })
}
