//! Data returned by the node's commands.
//!
//! Plain records deserialized from command results. Every field tolerates
//! being absent: strings and lists default to empty, numbers to `None`.

use std::fmt;

use serde::Deserialize;

// ==============================================================================
// Accounts and Wallet
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub label: String,
    /// Account kind such as `HD`; empty when the node did not report it.
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(rename = "HDindex")]
    pub hd_index: Option<i64>,
}

/// Result of `getwalletinfo`. Amounts are decimal NLG.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WalletInfo {
    #[serde(rename = "walletversion")]
    pub wallet_version: Option<u64>,
    pub balance: Option<f64>,
    pub unconfirmed_balance: Option<f64>,
    pub immature_balance: Option<f64>,
    #[serde(rename = "txcount")]
    pub transaction_count: Option<u64>,
    /// Unix time of the oldest key in the key pool.
    #[serde(rename = "keypoololdest")]
    pub key_pool_oldest: Option<u64>,
    #[serde(rename = "paytxfee")]
    pub pay_transaction_fee: Option<f64>,
}

// ==============================================================================
// Chain
// ==============================================================================

/// A block as returned by `getblock` (verbose) or `getblockheader`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Block {
    pub hash: String,
    /// `-1` for blocks that are not on the main chain.
    pub confirmations: Option<i64>,
    #[serde(rename = "strippedsize")]
    pub stripped_size: Option<u64>,
    pub size: Option<u64>,
    pub weight: Option<u64>,
    pub height: Option<u64>,
    pub version: Option<i64>,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    /// Transaction ids. Empty for headers.
    #[serde(rename = "tx")]
    pub transactions: Vec<String>,
    pub time: Option<u64>,
    #[serde(rename = "mediantime")]
    pub median_time: Option<u64>,
    pub nonce: Option<u64>,
    pub bits: String,
    pub difficulty: Option<f64>,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: Option<String>,
    #[serde(rename = "nextblockhash")]
    pub next_block_hash: Option<String>,
}

impl Block {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Result of `getblockchaininfo`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockChainInfo {
    pub chain: String,
    pub blocks: Option<u64>,
    pub headers: Option<u64>,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: String,
    pub difficulty: Option<f64>,
    #[serde(rename = "mediantime")]
    pub median_time: Option<u64>,
    #[serde(rename = "verificationprogress")]
    pub verification_progress: Option<f64>,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    pub pruned: bool,
    /// Soft fork deployment status, kept as reported.
    #[serde(rename = "softforks")]
    pub soft_forks: Vec<serde_json::Value>,
}

/// One entry of `getchaintips`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChainTip {
    pub height: Option<u64>,
    pub hash: String,
    #[serde(rename = "branchlen")]
    pub branch_length: Option<u64>,
    /// `active`, `valid-fork`, `headers-only`, `invalid` and so on.
    pub status: String,
}

// ==============================================================================
// Memory Pool
// ==============================================================================

/// Result of `getmempoolinfo`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemPoolInfo {
    pub size: Option<u64>,
    pub bytes: Option<u64>,
    pub usage: Option<u64>,
    #[serde(rename = "maxmempool")]
    pub max: Option<u64>,
    #[serde(rename = "mempoolminfee")]
    pub min_fee: Option<f64>,
}

/// Result of `getmempoolentry`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemPoolEntry {
    pub size: Option<u64>,
    pub fee: Option<f64>,
    #[serde(rename = "modifiedfee")]
    pub modified_fee: Option<f64>,
    pub time: Option<u64>,
    pub height: Option<u64>,
    #[serde(rename = "startingpriority")]
    pub starting_priority: Option<f64>,
    #[serde(rename = "currentpriority")]
    pub current_priority: Option<f64>,
    #[serde(rename = "descendantcount")]
    pub descendant_count: Option<u64>,
    #[serde(rename = "descendantsize")]
    pub descendant_size: Option<u64>,
    #[serde(rename = "descendantfees")]
    pub descendant_fees: Option<f64>,
    #[serde(rename = "ancestorcount")]
    pub ancestor_count: Option<u64>,
    #[serde(rename = "ancestorsize")]
    pub ancestor_size: Option<u64>,
    #[serde(rename = "ancestorfees")]
    pub ancestor_fees: Option<f64>,
    /// Unconfirmed parent transaction ids.
    pub depends: Vec<String>,
}

// ==============================================================================
// Node
// ==============================================================================

/// Result of `getinfo`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub version: Option<u64>,
    #[serde(rename = "protocolversion")]
    pub protocol_version: Option<u64>,
    pub blocks: Option<u64>,
    #[serde(rename = "timeoffset")]
    pub time_offset: Option<i64>,
    pub connections: Option<u64>,
    pub proxy: String,
    pub difficulty: Option<f64>,
    #[serde(rename = "testnet")]
    pub test_net: bool,
    #[serde(rename = "paytxfee")]
    pub pay_transaction_fee: Option<f64>,
    #[serde(rename = "relayfee")]
    pub relay_fee: Option<f64>,
    #[serde(rename = "mininput")]
    pub min_input: Option<f64>,
    pub errors: String,
}

// ==============================================================================
// Peers
// ==============================================================================

/// A `host:port` pair as the node prints it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    pub host: String,
    /// `0` when the text carried no usable port.
    pub port: u16,
}

impl PeerAddress {
    /// Split at the last `:`, so bracketed IPv6 hosts keep their colons.
    pub fn parse(text: &str) -> Self {
        match text.rsplit_once(':') {
            Some((host, port)) => Self {
                host: host.to_owned(),
                port: port.parse().unwrap_or(0),
            },
            None => Self {
                host: text.to_owned(),
                port: 0,
            },
        }
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One connected peer from `getpeerinfo`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawPeer")]
pub struct Peer {
    pub remote_address: PeerAddress,
    pub local_address: PeerAddress,
    pub inbound: bool,
    pub version: u64,
    /// User agent with the surrounding `/` removed.
    pub sub_version: String,
    /// Unix time the connection was established.
    pub connection_time: u64,
    pub time_offset: i64,
    pub relay_transactions: bool,
    pub ping_time: f64,
    pub minimum_ping_time: f64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawPeer {
    addr: String,
    addrlocal: String,
    inbound: bool,
    version: u64,
    subver: String,
    conntime: u64,
    timeoffset: i64,
    relaytxes: bool,
    pingtime: f64,
    minping: f64,
}

impl From<RawPeer> for Peer {
    fn from(raw: RawPeer) -> Self {
        Self {
            remote_address: PeerAddress::parse(&raw.addr),
            local_address: PeerAddress::parse(&raw.addrlocal),
            inbound: raw.inbound,
            version: raw.version,
            sub_version: raw.subver.trim_matches('/').to_owned(),
            connection_time: raw.conntime,
            time_offset: raw.timeoffset,
            relay_transactions: raw.relaytxes,
            ping_time: raw.pingtime,
            minimum_ping_time: raw.minping,
        }
    }
}

/// All connected peers, oldest connection first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Peer>")]
pub struct PeerInfo {
    peers: Vec<Peer>,
}

impl From<Vec<Peer>> for PeerInfo {
    fn from(mut peers: Vec<Peer>) -> Self {
        peers.sort_by_key(|peer| peer.connection_time);
        Self { peers }
    }
}

impl PeerInfo {
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    pub fn inbound(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter().filter(|peer| peer.inbound)
    }

    pub fn outbound(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter().filter(|peer| !peer.inbound)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn inbound_count(&self) -> usize {
        self.inbound().count()
    }

    pub fn outbound_count(&self) -> usize {
        self.outbound().count()
    }
}
