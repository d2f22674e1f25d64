//! Chain-specific types and error definitions.

use std::fmt;

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The node queries issued while assembling an authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeQuery {
    /// Pending transaction count of the sender.
    Nonce,
    /// Network chain identifier.
    ChainId,
    /// Suggested legacy gas price.
    GasPrice,
}

impl NodeQuery {
    /// Stable label used in errors, logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeQuery::Nonce => "nonce",
            NodeQuery::ChainId => "chain-id",
            NodeQuery::GasPrice => "gas-price",
        }
    }
}

impl fmt::Display for NodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building or consuming an authorization.
///
/// Messages never carry key material.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The secret key is not hex, not 32 bytes, or not a valid secp256k1 scalar.
    #[error("Invalid private key format: {0}")]
    InvalidKeyFormat(String),

    /// The derived public key could not be turned into a consistent address.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// The node endpoint could not be parsed.
    #[error("Invalid node endpoint: {0}")]
    InvalidEndpoint(String),

    /// The node (or the transport to it) failed to answer a query.
    #[error("Node query '{query}' failed: {message}")]
    NodeQuery { query: NodeQuery, message: String },

    /// A query exceeded the call context's deadline.
    #[error("Node query '{query}' timed out after {secs} seconds")]
    Timeout { query: NodeQuery, secs: u64 },

    /// The caller cancelled the call while a query was pending.
    #[error("Node query '{query}' cancelled")]
    Cancelled { query: NodeQuery },

    /// The signer could not be bound to the reported chain.
    #[error("Signer construction failed: {0}")]
    SignerConstruction(String),

    /// Signing a transaction with the authorization failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The node reports a different network than expected.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl AuthError {
    /// Whether a caller may reasonably retry the whole call.
    ///
    /// Only transport-level failures qualify; the builder itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::NodeQuery { .. } | AuthError::Timeout { .. })
    }

    /// The node query this error refers to, if any.
    pub fn query(&self) -> Option<NodeQuery> {
        match self {
            AuthError::NodeQuery { query, .. }
            | AuthError::Timeout { query, .. }
            | AuthError::Cancelled { query } => Some(*query),
            _ => None,
        }
    }
}

/// Result type for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;
