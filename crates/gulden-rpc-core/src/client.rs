//! The command dispatcher and composition root.
//!
//! [`GuldenClient`] owns the transport and connection settings, sends every
//! command through one envelope path, and hands out the grouped sub-clients.

use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::address;
use crate::error::{CoreError, TransportError};
use crate::rpc::{
    endpoint_url, resolve_credentials, strip_absent, Credentials, HttpRequest, HttpTransport,
    JsonRpcRequest, NodeConfig, NodeResponse, RequestIds, Transport, JSON_CONTENT_TYPE,
    STATUS_SUCCESS,
};
use crate::subclient::{
    AccountsClient, BlockChainClient, ControlClient, NetworkClient, WalletClient,
};

// ==============================================================================
// Dispatcher
// ==============================================================================

/// Sends commands to the node. Shared by the client and every sub-client.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    url: String,
    credentials: Credentials,
    ids: RequestIds,
}

impl Dispatcher {
    /// Send `method` with positional `params` and normalize the reply.
    ///
    /// `null` parameters are dropped before sending. HTTP error statuses come
    /// back as unsuccessful [`NodeResponse`]s; only transport faults such as
    /// a refused connection are returned as errors.
    pub async fn execute(&self, method: &str, params: Vec<Value>) -> Result<NodeResponse, CoreError> {
        let params = strip_absent(params);
        let id = self.ids.next();
        debug!(
            rpc.id = %id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );

        let body = serde_json::to_string(&JsonRpcRequest { method, params, id: id.clone() })
            .map_err(|e| CoreError::Input(format!("encode parameters for {method}: {e}")))?;
        let request = HttpRequest {
            url: self.url.clone(),
            content_type: JSON_CONTENT_TYPE,
            credentials: self.credentials.clone(),
            body,
        };

        let reply = match self.transport.post(&request).await {
            Ok(reply) => reply,
            Err(TransportError::Status(reply)) => {
                warn!(rpc.id = %id, rpc.method = method, status = reply.status, "rpc http error status");
                reply
            }
            Err(err) => return Err(err.into()),
        };
        debug!(rpc.id = %id, rpc.method = method, status = reply.status, body_len = reply.body.len(), "rpc response");
        trace!(rpc.id = %id, rpc.method = method, body = %reply.body, "rpc response body");

        Ok(NodeResponse::from_reply(&reply))
    }

    /// [`execute`](Self::execute) and require success; yields the raw result.
    pub async fn command(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        Ok(self.execute(method, params).await?.require_success()?.into_result())
    }

    /// Typed catch-all: run any command and deserialize its result into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, CoreError> {
        let result = self.command(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| CoreError::InvalidResponse(format!("invalid {method} result: {e}")))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// ==============================================================================
// GuldenClient
// ==============================================================================

/// Client for a Gulden full node's JSON-RPC interface.
///
/// Sub-clients are created on first access and reused for the lifetime of
/// the client. All methods take `&self`, so one client can serve concurrent
/// calls as long as the transport can.
pub struct GuldenClient {
    dispatcher: Arc<Dispatcher>,
    accounts: OnceLock<AccountsClient>,
    blockchain: OnceLock<BlockChainClient>,
    control: OnceLock<ControlClient>,
    network: OnceLock<NetworkClient>,
    wallet: OnceLock<WalletClient>,
}

impl GuldenClient {
    /// Build a client over the default `reqwest` transport.
    pub fn new(config: &NodeConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client over a caller-supplied transport.
    ///
    /// The host gets an `http://` prefix when it has no scheme, and a port
    /// outside `1..=65535` is replaced by the default node port.
    pub fn with_transport(
        config: &NodeConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        let url = endpoint_url(&config.host, config.port)?;
        let credentials = resolve_credentials(
            config.username.as_deref(),
            config.password.as_deref(),
            config.cookie_file.as_deref(),
        )?;
        debug!(%url, user = %credentials.username, "gulden rpc client configured");

        Ok(Self {
            dispatcher: Arc::new(Dispatcher {
                transport,
                url,
                credentials,
                ids: RequestIds::new(),
            }),
            accounts: OnceLock::new(),
            blockchain: OnceLock::new(),
            control: OnceLock::new(),
            network: OnceLock::new(),
            wallet: OnceLock::new(),
        })
    }

    /// Endpoint every request is posted to (`{host}:{port}`).
    pub fn url(&self) -> &str {
        self.dispatcher.url()
    }

    /// Invoke any node command by name. See [`Dispatcher::execute`].
    pub async fn execute(&self, method: &str, params: Vec<Value>) -> Result<NodeResponse, CoreError> {
        self.dispatcher.execute(method, params).await
    }

    /// Invoke any node command by name and deserialize its result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, CoreError> {
        self.dispatcher.call(method, params).await
    }

    /// Help text for one command, or the command list when `command` is `None`.
    pub async fn help(&self, command: Option<&str>) -> Result<String, CoreError> {
        let result = self.dispatcher.command("help", vec![command.into()]).await?;
        Ok(crate::subclient::text(result))
    }

    /// Probe the node with `getinfo`. Only the HTTP status is considered.
    pub async fn verify_connection(&self) -> Result<bool, CoreError> {
        let response = self.dispatcher.execute("getinfo", Vec::new()).await?;
        Ok(response.status() == STATUS_SUCCESS)
    }

    pub fn validate_address_format(&self, address: &str) -> bool {
        address::validate_format(address)
    }

    pub fn validate_address(&self, address: &str) -> bool {
        address::validate(address)
    }

    pub fn accounts(&self) -> &AccountsClient {
        self.accounts
            .get_or_init(|| AccountsClient::new(Arc::clone(&self.dispatcher)))
    }

    pub fn blockchain(&self) -> &BlockChainClient {
        self.blockchain
            .get_or_init(|| BlockChainClient::new(Arc::clone(&self.dispatcher)))
    }

    pub fn control(&self) -> &ControlClient {
        self.control
            .get_or_init(|| ControlClient::new(Arc::clone(&self.dispatcher)))
    }

    pub fn network(&self) -> &NetworkClient {
        self.network
            .get_or_init(|| NetworkClient::new(Arc::clone(&self.dispatcher)))
    }

    pub fn wallet(&self) -> &WalletClient {
        self.wallet
            .get_or_init(|| WalletClient::new(Arc::clone(&self.dispatcher)))
    }
}
