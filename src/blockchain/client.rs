//! Node collaborator: the chain-state queries the authorization builder needs.
//!
//! # Responsibilities
//! - Define the read-only query surface (`ChainState`)
//! - Implement it over an alloy HTTP JSON-RPC provider (`NodeClient`)
//! - Tag transport failures with the query that produced them
//!
//! # Design Decisions
//! - Each query is attempted once; retry policy belongs to the caller
//! - Deadlines and cancellation are applied by the caller's `CallContext`,
//!   which drops the query future when either fires

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

use crate::blockchain::types::{AuthError, AuthResult, ChainId, NodeQuery};
use crate::config::schema::NodeConfig;

/// Read-only chain state exposed by a node connection.
///
/// Implementations must tolerate concurrent use.
#[async_trait]
pub trait ChainState: Send + Sync {
    /// Transaction count of `address` including pending transactions.
    async fn pending_nonce(&self, address: Address) -> AuthResult<u64>;

    /// Chain identifier of the connected network.
    async fn chain_id(&self) -> AuthResult<ChainId>;

    /// Suggested legacy gas price in wei.
    async fn gas_price(&self) -> AuthResult<u128>;
}

/// JSON-RPC node client.
#[derive(Clone)]
pub struct NodeClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
}

impl NodeClient {
    /// Create a client for the configured endpoint.
    ///
    /// No request is sent until the first query.
    pub fn new(config: &NodeConfig) -> AuthResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            AuthError::InvalidEndpoint(format!("invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new().connect_http(url);
        tracing::info!(rpc_url = %config.rpc_url, "Node client initialized");

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: config.rpc_url.clone(),
        })
    }

    /// Wrap an existing provider.
    pub fn from_provider(provider: Arc<dyn Provider + Send + Sync>, rpc_url: impl Into<String>) -> Self {
        Self {
            provider,
            rpc_url: rpc_url.into(),
        }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.provider.as_ref()
    }

    /// The endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

fn query_error(query: NodeQuery, error: TransportError) -> AuthError {
    AuthError::NodeQuery {
        query,
        message: error.to_string(),
    }
}

#[async_trait]
impl ChainState for NodeClient {
    async fn pending_nonce(&self, address: Address) -> AuthResult<u64> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| query_error(NodeQuery::Nonce, e))
    }

    async fn chain_id(&self) -> AuthResult<ChainId> {
        self.provider
            .get_chain_id()
            .await
            .map(ChainId)
            .map_err(|e| query_error(NodeQuery::ChainId, e))
    }

    async fn gas_price(&self) -> AuthResult<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| query_error(NodeQuery::GasPrice, e))
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}
