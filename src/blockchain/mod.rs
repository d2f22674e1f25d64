//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Secret key (caller or environment variable)
//!     → wallet.rs (decode, derive public key and address)
//!     → client.rs (pending nonce, chain id, gas price)
//!     → authorization.rs (bind signer to chain, assemble Authorization)
//! ```
//!
//! # Security Constraints
//! - Private keys never appear in logs, errors or `Debug` output
//! - Every node query runs under the caller's `CallContext`
//! - Failures are returned, never fatal to the process

pub mod authorization;
pub mod client;
pub mod types;
pub mod wallet;

pub use authorization::{build_authorization, Authorization, AuthorizationSummary};
pub use client::{ChainState, NodeClient};
pub use types::{AuthError, AuthResult, ChainId, NodeQuery};
pub use wallet::Wallet;
