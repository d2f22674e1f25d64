//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::Address;
use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use chain_auth::blockchain::{AuthError, AuthResult, ChainId, ChainState, NodeQuery};

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// How a scripted query responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Reply,
    Fail,
    Hang,
}

/// In-memory node that answers with fixed values and records every query it receives.
pub struct ScriptedNode {
    nonce: u64,
    chain_id: u64,
    gas_price: u128,
    behaviors: HashMap<NodeQuery, Behavior>,
    calls: Mutex<Vec<NodeQuery>>,
    nonce_address: Mutex<Option<Address>>,
}

impl ScriptedNode {
    pub fn new(nonce: u64, chain_id: u64, gas_price: u128) -> Self {
        Self {
            nonce,
            chain_id,
            gas_price,
            behaviors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            nonce_address: Mutex::new(None),
        }
    }

    pub fn with(mut self, query: NodeQuery, behavior: Behavior) -> Self {
        self.behaviors.insert(query, behavior);
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<NodeQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Address passed to the nonce query, if it was issued.
    pub fn nonce_address(&self) -> Option<Address> {
        *self.nonce_address.lock().unwrap()
    }

    async fn answer<T>(&self, query: NodeQuery, value: T) -> AuthResult<T> {
        self.calls.lock().unwrap().push(query);
        match self.behaviors.get(&query).copied().unwrap_or(Behavior::Reply) {
            Behavior::Reply => Ok(value),
            Behavior::Fail => Err(AuthError::NodeQuery {
                query,
                message: "connection reset by peer".to_string(),
            }),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl ChainState for ScriptedNode {
    async fn pending_nonce(&self, address: Address) -> AuthResult<u64> {
        *self.nonce_address.lock().unwrap() = Some(address);
        self.answer(NodeQuery::Nonce, self.nonce).await
    }

    async fn chain_id(&self) -> AuthResult<ChainId> {
        self.answer(NodeQuery::ChainId, ChainId(self.chain_id)).await
    }

    async fn gas_price(&self) -> AuthResult<u128> {
        self.answer(NodeQuery::GasPrice, self.gas_price).await
    }
}

/// Canned JSON-RPC node served over HTTP.
#[derive(Clone, Default)]
pub struct MockRpc {
    results: Arc<HashMap<String, Value>>,
    delays: Arc<HashMap<String, Duration>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockRpc {
    /// Answer `eth_getTransactionCount`, `eth_chainId` and `eth_gasPrice` with the given values.
    pub fn new(nonce: u64, chain_id: u64, gas_price: u128) -> Self {
        let mut results = HashMap::new();
        results.insert("eth_getTransactionCount".to_string(), json!(format!("{:#x}", nonce)));
        results.insert("eth_chainId".to_string(), json!(format!("{:#x}", chain_id)));
        results.insert("eth_gasPrice".to_string(), json!(format!("{:#x}", gas_price)));
        Self {
            results: Arc::new(results),
            ..Self::default()
        }
    }

    /// Stop answering `method`; requests for it get a JSON-RPC error.
    pub fn without(mut self, method: &str) -> Self {
        Arc::make_mut(&mut self.results).remove(method);
        self
    }

    /// Delay every answer to `method` by `delay`.
    pub fn delayed(mut self, method: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(method.to_string(), delay);
        self
    }

    /// Every request body received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Methods of every request received so far.
    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r["method"].as_str().map(str::to_string))
            .collect()
    }

    /// Serve on an ephemeral local port and return its URL.
    pub async fn start(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let app = Router::new().route("/", post(handle)).with_state(self.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }
}

async fn handle(State(mock): State<MockRpc>, Json(request): Json<Value>) -> Json<Value> {
    mock.requests.lock().unwrap().push(request.clone());

    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();

    if let Some(delay) = mock.delays.get(&method) {
        tokio::time::sleep(*delay).await;
    }

    match mock.results.get(&method) {
        Some(result) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
        None => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {} not available", method) }
        })),
    }
}
