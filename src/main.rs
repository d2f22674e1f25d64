//! chain-auth CLI
//!
//! Loads node settings, reads the secret key from `CHAIN_AUTH_PRIVATE_KEY`,
//! assembles an authorization from live node state and prints it as JSON.
//! The key itself is never printed or logged.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use chain_auth::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use chain_auth::blockchain::{build_authorization, AuthError, ChainId, NodeClient};
use chain_auth::config::{load_config, validate_config, AuthConfig, ConfigError};
use chain_auth::lifecycle::{signals, CallContext, Cancellation};
use chain_auth::observability::logging;

#[derive(Parser)]
#[command(name = "chain-auth")]
#[command(about = "Assemble a transaction authorization from live node state", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "CHAIN_AUTH_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint (overrides node.rpc_url)
    #[arg(long, env = "CHAIN_AUTH_RPC_URL")]
    rpc_url: Option<String>,

    /// Gas limit (overrides authorization.gas_limit)
    #[arg(long)]
    gas_limit: Option<u64>,

    /// Per-query timeout in seconds (overrides node.rpc_timeout_secs)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fail unless the node serves this chain (overrides node.expected_chain_id)
    #[arg(long)]
    expected_chain_id: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<AuthConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AuthConfig::default(),
        };

        if let Some(rpc_url) = &self.rpc_url {
            config.node.rpc_url = rpc_url.clone();
        }
        if let Some(gas_limit) = self.gas_limit {
            config.authorization.gas_limit = gas_limit;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.node.rpc_timeout_secs = timeout_secs;
        }
        if let Some(chain_id) = self.expected_chain_id {
            config.node.expected_chain_id = Some(chain_id);
        }
        if self.json_logs {
            config.observability.json_logs = true;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability)?;

    tracing::info!(
        rpc_url = %config.node.rpc_url,
        rpc_timeout_secs = config.node.rpc_timeout_secs,
        gas_limit = config.authorization.gas_limit,
        "Configuration loaded"
    );

    let secret_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
        AuthError::InvalidKeyFormat(format!(
            "environment variable {} not set",
            PRIVATE_KEY_ENV_VAR
        ))
    })?;

    let client = NodeClient::new(&config.node)?;

    let cancel = Cancellation::new();
    let signal_task = signals::cancel_on_signal(cancel.clone());
    let ctx = CallContext::new(cancel)
        .with_timeout(Duration::from_secs(config.node.rpc_timeout_secs));

    let result = build_authorization(
        &client,
        &ctx,
        &secret_key,
        config.authorization.gas_limit,
    )
    .await;
    drop(secret_key);
    signal_task.abort();

    let authorization = result?;
    if let Some(expected) = config.node.expected_chain_id {
        authorization.ensure_chain(ChainId(expected))?;
    }

    println!("{}", serde_json::to_string_pretty(&authorization.summary())?);
    Ok(())
}
