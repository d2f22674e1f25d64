//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chain ids > 0)
//! - Check the RPC URL parses and uses an HTTP scheme
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AuthConfig → Result<(), Vec<ValidationError>>
//! - Gas limit is deliberately not range-checked; it is passed through to the node

use thiserror::Error;

use crate::config::schema::AuthConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("node.rpc_url must not be empty")]
    EmptyRpcUrl,

    #[error("node.rpc_url '{url}' is invalid: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("node.rpc_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("node.expected_chain_id must be greater than zero")]
    ZeroChainId,

    #[error("observability.log_level must not be empty")]
    EmptyLogLevel,
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &AuthConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let rpc_url = config.node.rpc_url.trim();
    if rpc_url.is_empty() {
        errors.push(ValidationError::EmptyRpcUrl);
    } else {
        match url::Url::parse(rpc_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidRpcUrl {
                url: rpc_url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidRpcUrl {
                url: rpc_url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if config.node.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.node.expected_chain_id == Some(0) {
        errors.push(ValidationError::ZeroChainId);
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AuthConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AuthConfig::default();
        config.node.rpc_url = String::new();
        config.node.rpc_timeout_secs = 0;
        config.node.expected_chain_id = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyRpcUrl,
                ValidationError::ZeroTimeout,
                ValidationError::ZeroChainId,
            ]
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = AuthConfig::default();
        config.node.rpc_url = "ws://localhost:8546".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidRpcUrl { .. }));
        assert!(errors[0].to_string().contains("unsupported scheme 'ws'"));
    }

    #[test]
    fn test_gas_limit_not_checked() {
        let mut config = AuthConfig::default();
        config.authorization.gas_limit = 0;
        assert!(validate_config(&config).is_ok());
    }
}
