//! Cancellation and deadlines for node calls.
//!
//! # Responsibilities
//! - Carry a caller-owned cancellation signal into every node query
//! - Apply an optional per-query deadline
//! - Drop the in-flight query future as soon as either fires
//!
//! # Design Decisions
//! - Built on a `watch` channel so a signal sent before a query starts is still observed
//! - The context never retries; it only decides how a single attempt ends

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::blockchain::types::{AuthError, AuthResult, NodeQuery};
use crate::observability::metrics;

/// Cloneable cancellation signal.
///
/// All clones observe the same state; once cancelled it stays cancelled.
#[derive(Debug, Clone)]
pub struct Cancellation {
    tx: Arc<watch::Sender<bool>>,
}

impl Cancellation {
    /// Create a new, not yet cancelled, signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Trigger cancellation for every holder of this signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether cancellation has been triggered.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once cancellation has been triggered.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as `self`, so this is unreachable.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call context handed to every node query.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: Cancellation,
    timeout: Option<Duration>,
}

impl CallContext {
    /// Create a context observing `cancel`, with no deadline.
    pub fn new(cancel: Cancellation) -> Self {
        Self {
            cancel,
            timeout: None,
        }
    }

    /// Bound each query issued under this context by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The cancellation signal observed by this context.
    pub fn cancellation(&self) -> &Cancellation {
        &self.cancel
    }

    /// Per-query deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run one node query under this context.
    ///
    /// An already cancelled context returns `Cancelled` without polling `fut`.
    pub async fn run<T, F>(&self, query: NodeQuery, fut: F) -> AuthResult<T>
    where
        F: Future<Output = AuthResult<T>>,
    {
        if self.cancel.is_cancelled() {
            metrics::record_node_query(query, "cancelled", Duration::ZERO);
            return Err(AuthError::Cancelled { query });
        }

        let start = Instant::now();
        let limit = self.timeout;
        let bounded = async move {
            match limit {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(AuthError::Timeout {
                        query,
                        secs: limit.as_secs(),
                    }),
                },
                None => fut.await,
            }
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AuthError::Cancelled { query }),
            result = bounded => result,
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(AuthError::Cancelled { .. }) => "cancelled",
            Err(AuthError::Timeout { .. }) => "timeout",
            Err(_) => "error",
        };
        metrics::record_node_query(query, outcome, start.elapsed());

        if let Err(e) = &result {
            tracing::debug!(query = %query, error = %e, "Node query did not complete");
        }
        result
    }
}
