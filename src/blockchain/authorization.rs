//! Transaction authorization assembly.
//!
//! # Responsibilities
//! - Derive the sender from a secret key
//! - Fetch pending nonce, chain id and gas price from the node
//! - Bind the signer to the reported chain
//! - Hand out an immutable, single-use `Authorization`
//!
//! # Design Decisions
//! - Queries run in a fixed order and stop at the first failure
//! - No retries; every failure is returned to the caller as a typed error
//! - The transfer value is always zero

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use serde::Serialize;

use crate::blockchain::client::ChainState;
use crate::blockchain::types::{AuthError, AuthResult, ChainId, NodeQuery};
use crate::blockchain::wallet::Wallet;
use crate::lifecycle::cancel::CallContext;
use crate::observability::metrics;

/// Ready-to-sign transaction parameters for one transaction.
///
/// Consuming methods take `self`, so an authorization yields at most one transaction.
pub struct Authorization {
    signer: PrivateKeySigner,
    from: Address,
    chain_id: ChainId,
    nonce: u64,
    value: U256,
    gas_limit: u64,
    gas_price: u128,
}

impl Authorization {
    /// Signer bound to `chain_id`.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sender address, derived from the signer's key.
    pub fn sender(&self) -> Address {
        self.from
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Native value to transfer; always zero.
    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Gas price in wei.
    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    /// Fail unless the node reported `expected`.
    pub fn ensure_chain(&self, expected: ChainId) -> AuthResult<()> {
        if self.chain_id != expected {
            return Err(AuthError::ChainMismatch {
                expected: expected.0,
                actual: self.chain_id.0,
            });
        }
        Ok(())
    }

    /// Key-free view of the authorization for display.
    pub fn summary(&self) -> AuthorizationSummary {
        AuthorizationSummary {
            from: self.from,
            chain_id: self.chain_id.0,
            nonce: self.nonce,
            value: self.value.to_string(),
            gas_limit: self.gas_limit,
            gas_price: self.gas_price.to_string(),
        }
    }

    /// Consume into the signer and a fully populated legacy transaction request.
    ///
    /// # Arguments
    /// * `to` - Contract or account to call
    /// * `input` - Call data
    pub fn into_request(self, to: Address, input: Bytes) -> (PrivateKeySigner, TransactionRequest) {
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_value(self.value)
            .with_input(input)
            .with_nonce(self.nonce)
            .with_gas_price(self.gas_price)
            .with_chain_id(self.chain_id.0)
            .with_gas_limit(self.gas_limit);

        (self.signer, request)
    }

    /// Consume into a signed EIP-155 legacy transaction.
    pub fn sign_legacy(self, to: TxKind, input: Bytes) -> AuthResult<TxEnvelope> {
        use alloy::network::TxSignerSync;

        let mut tx = TxLegacy {
            chain_id: Some(self.chain_id.0),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to,
            value: self.value,
            input,
        };

        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(TxEnvelope::Legacy(tx.into_signed(signature)))
    }
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorization")
            .field("from", &self.from)
            .field("chain_id", &self.chain_id)
            .field("nonce", &self.nonce)
            .field("value", &self.value)
            .field("gas_limit", &self.gas_limit)
            .field("gas_price", &self.gas_price)
            .finish_non_exhaustive()
    }
}

/// Serializable authorization parameters, without key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationSummary {
    pub from: Address,
    pub chain_id: u64,
    pub nonce: u64,
    /// Decimal wei.
    pub value: String,
    pub gas_limit: u64,
    /// Decimal wei.
    pub gas_price: String,
}

/// Build an authorization for the key in `secret_key_hex`.
///
/// # Arguments
/// * `node` - Node connection; used read-only
/// * `ctx` - Cancellation and deadline applied to every node query
/// * `secret_key_hex` - 32-byte hex private key, `0x` prefix optional
/// * `gas_limit` - Passed through unchanged
///
/// # Errors
/// Returns the error of the first failing step. A malformed key fails before any
/// node query is issued.
#[tracing::instrument(name = "build_authorization", skip_all, fields(gas_limit = gas_limit))]
pub async fn build_authorization<N>(
    node: &N,
    ctx: &CallContext,
    secret_key_hex: &str,
    gas_limit: u64,
) -> AuthResult<Authorization>
where
    N: ChainState + ?Sized,
{
    let result = assemble(node, ctx, secret_key_hex, gas_limit).await;
    match &result {
        Ok(auth) => {
            metrics::record_authorization("ok");
            tracing::info!(
                address = %auth.from,
                chain_id = %auth.chain_id,
                nonce = auth.nonce,
                gas_price = auth.gas_price,
                "Authorization assembled"
            );
        }
        Err(e) => {
            metrics::record_authorization("error");
            tracing::warn!(error = %e, "Authorization failed");
        }
    }
    result
}

async fn assemble<N>(
    node: &N,
    ctx: &CallContext,
    secret_key_hex: &str,
    gas_limit: u64,
) -> AuthResult<Authorization>
where
    N: ChainState + ?Sized,
{
    let wallet = Wallet::from_private_key(secret_key_hex)?;
    let from = wallet.address();
    tracing::debug!(address = %from, "Sender derived");

    let nonce = ctx.run(NodeQuery::Nonce, node.pending_nonce(from)).await?;
    let chain_id = ctx.run(NodeQuery::ChainId, node.chain_id()).await?;
    let gas_price = ctx.run(NodeQuery::GasPrice, node.gas_price()).await?;

    let signer = wallet.bind_to_chain(chain_id)?;

    Ok(Authorization {
        signer,
        from,
        chain_id,
        nonce,
        value: U256::ZERO,
        gas_limit,
        gas_price,
    })
}
