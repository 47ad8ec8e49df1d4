use std::sync::Arc;

use crate::client::Dispatcher;
use crate::error::CoreError;
use crate::types::{Peer, PeerInfo};

use super::list;

/// Peer connections.
pub struct NetworkClient {
    dispatcher: Arc<Dispatcher>,
}

impl NetworkClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Connected peers, oldest connection first.
    pub async fn get_peer_info(&self) -> Result<PeerInfo, CoreError> {
        let result = self
            .dispatcher
            .command("getpeerinfo", Vec::new())
            .await?;
        let peers: Vec<Peer> = list("getpeerinfo", result)?;
        Ok(PeerInfo::from(peers))
    }
}
