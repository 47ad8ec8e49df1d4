use std::sync::Arc;

use serde_json::json;

use crate::client::Dispatcher;
use crate::error::CoreError;
use crate::types::{Block, BlockChainInfo, ChainTip, MemPoolEntry, MemPoolInfo};

use super::{decimal, flag, integer, list, record, text};

/// Chain state, blocks, and the memory pool.
pub struct BlockChainClient {
    dispatcher: Arc<Dispatcher>,
}

impl BlockChainClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn get_best_block_hash(&self) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getbestblockhash", Vec::new())
            .await?;
        Ok(text(result))
    }

    /// Block with its transaction ids (`getblock <hash> true`).
    pub async fn get_block(&self, hash: &str) -> Result<Block, CoreError> {
        let result = self
            .dispatcher
            .command("getblock", vec![json!(hash), json!(true)])
            .await?;
        record("getblock", result)
    }

    pub async fn get_blockchain_info(&self) -> Result<BlockChainInfo, CoreError> {
        let result = self
            .dispatcher
            .command("getblockchaininfo", Vec::new())
            .await?;
        record("getblockchaininfo", result)
    }

    pub async fn get_block_count(&self) -> Result<u64, CoreError> {
        let result = self
            .dispatcher
            .command("getblockcount", Vec::new())
            .await?;
        integer("getblockcount", &result)
    }

    pub async fn get_block_hash(&self, height: u64) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getblockhash", vec![json!(height)])
            .await?;
        Ok(text(result))
    }

    /// Header fields only; `transactions` is empty.
    pub async fn get_block_header(&self, hash: &str) -> Result<Block, CoreError> {
        let result = self
            .dispatcher
            .command("getblockheader", vec![json!(hash)])
            .await?;
        record("getblockheader", result)
    }

    pub async fn get_chain_tips(&self) -> Result<Vec<ChainTip>, CoreError> {
        let result = self
            .dispatcher
            .command("getchaintips", Vec::new())
            .await?;
        list("getchaintips", result)
    }

    pub async fn get_difficulty(&self) -> Result<f64, CoreError> {
        let result = self
            .dispatcher
            .command("getdifficulty", Vec::new())
            .await?;
        decimal("getdifficulty", &result)
    }

    pub async fn get_mempool_entry(&self, txid: &str) -> Result<MemPoolEntry, CoreError> {
        let result = self
            .dispatcher
            .command("getmempoolentry", vec![json!(txid)])
            .await?;
        record("getmempoolentry", result)
    }

    pub async fn get_mempool_info(&self) -> Result<MemPoolInfo, CoreError> {
        let result = self
            .dispatcher
            .command("getmempoolinfo", Vec::new())
            .await?;
        record("getmempoolinfo", result)
    }

    /// Transaction ids currently in the memory pool.
    pub async fn get_raw_mempool(&self) -> Result<Vec<String>, CoreError> {
        let result = self
            .dispatcher
            .command("getrawmempool", Vec::new())
            .await?;
        list("getrawmempool", result)
    }

    /// Verify the last `blocks` blocks of the chain database.
    pub async fn verify_chain(&self, blocks: u32) -> Result<bool, CoreError> {
        let result = self
            .dispatcher
            .command("verifychain", vec![json!(blocks)])
            .await?;
        Ok(flag(&result))
    }
}
