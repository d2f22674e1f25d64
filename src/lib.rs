//! Transaction authorization for Ethereum-compatible nodes.
//!
//! Derives a sender from a secret key, reads pending nonce, chain id and gas
//! price from a node, and assembles a single-use [`Authorization`].

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use blockchain::{build_authorization, AuthError, Authorization, ChainState, NodeClient};
pub use config::AuthConfig;
pub use lifecycle::{CallContext, Cancellation};
