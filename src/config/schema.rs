//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Node connection settings.
    pub node: NodeConfig,

    /// Authorization parameters.
    pub authorization: AuthorizationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Per-query timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Chain the node is expected to serve (e.g., 1 for Ethereum mainnet, 31337 for Anvil).
    /// Unchecked when absent.
    pub expected_chain_id: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            rpc_timeout_secs: 10,
            expected_chain_id: None,
        }
    }
}

/// Authorization parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Gas limit handed to the builder unchanged.
    pub gas_limit: u64,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self { gas_limit: 21_000 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "chain_auth=info".to_string(),
            json_logs: false,
        }
    }
}
