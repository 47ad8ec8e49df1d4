use std::sync::Arc;

use crate::client::Dispatcher;
use crate::error::CoreError;
use crate::types::NodeInfo;

use super::{record, text};

/// Node status and lifecycle.
pub struct ControlClient {
    dispatcher: Arc<Dispatcher>,
}

impl ControlClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn get_info(&self) -> Result<NodeInfo, CoreError> {
        let result = self.dispatcher.command("getinfo", Vec::new()).await?;
        record("getinfo", result)
    }

    /// Ask the node to shut down. Returns the node's farewell text.
    pub async fn stop(&self) -> Result<String, CoreError> {
        let result = self.dispatcher.command("stop", Vec::new()).await?;
        Ok(text(result))
    }
}
