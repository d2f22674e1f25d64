//! Secret key decoding and signer derivation.
//!
//! # Security
//! - Private keys come from the caller; the CLI reads them from `CHAIN_AUTH_PRIVATE_KEY`
//! - Keys are never logged, serialized, or shown in `Debug` output
//! - Error messages describe what is wrong with a key, never its contents

use alloy::hex;
use alloy::primitives::{Address, B256};
use alloy::signers::k256::ecdsa::VerifyingKey;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::utils::public_key_to_address;
use alloy::signers::Signer;

use crate::blockchain::types::{AuthError, AuthResult, ChainId};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CHAIN_AUTH_PRIVATE_KEY";

/// Largest chain id whose EIP-155 `v` value (`chain_id * 2 + 36`) fits in a `u64`.
pub const MAX_EIP155_CHAIN_ID: u64 = (u64::MAX - 36) / 2;

/// A signer together with the public key and address derived from it.
///
/// The address is always the one computed from this signer's public key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    public_key: VerifyingKey,
    address: Address,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - 32-byte hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> AuthResult<Self> {
        let signer = decode_private_key(private_key_hex)?;
        Self::derive(signer)
    }

    fn derive(signer: PrivateKeySigner) -> AuthResult<Self> {
        let public_key = *signer.credential().verifying_key();
        let address = public_key_to_address(&public_key);

        if address != signer.address() {
            return Err(AuthError::KeyDerivation(format!(
                "address {} derived from public key does not match signer address {}",
                address,
                signer.address()
            )));
        }

        Ok(Self {
            signer,
            public_key,
            address,
        })
    }

    /// The secp256k1 public key of this wallet.
    pub fn public_key(&self) -> &VerifyingKey {
        &self.public_key
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Consume the wallet into a signer bound to `chain_id` for EIP-155 replay protection.
    pub fn bind_to_chain(self, chain_id: ChainId) -> AuthResult<PrivateKeySigner> {
        if chain_id.0 == 0 {
            return Err(AuthError::SignerConstruction(
                "chain id 0 is not valid for replay-protected signing".to_string(),
            ));
        }
        if chain_id.0 > MAX_EIP155_CHAIN_ID {
            return Err(AuthError::SignerConstruction(format!(
                "chain id {} is too large for EIP-155 signatures",
                chain_id
            )));
        }

        Ok(self.signer.with_chain_id(Some(chain_id.0)))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Decode a hex private key into a signer.
fn decode_private_key(private_key_hex: &str) -> AuthResult<PrivateKeySigner> {
    let key_hex = private_key_hex
        .strip_prefix("0x")
        .unwrap_or(private_key_hex);
    if key_hex.starts_with("0x") {
        return Err(AuthError::InvalidKeyFormat("repeated 0x prefix".to_string()));
    }

    let bytes = hex::decode(key_hex).map_err(|e| {
        let reason = match e {
            hex::FromHexError::OddLength => "odd number of hex digits".to_string(),
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                format!("non-hex character at position {}", index)
            }
            _ => "not a hex string".to_string(),
        };
        AuthError::InvalidKeyFormat(reason)
    })?;

    if bytes.len() != 32 {
        return Err(AuthError::InvalidKeyFormat(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    PrivateKeySigner::from_bytes(&B256::from_slice(&bytes)).map_err(|_| {
        AuthError::InvalidKeyFormat("not a valid secp256k1 scalar".to_string())
    })
}
