//! Metrics collection.
//!
//! # Metrics
//! - `chain_auth_node_queries_total` (counter): node queries by query, outcome
//! - `chain_auth_node_query_duration_seconds` (histogram): latency per query
//! - `chain_auth_authorizations_total` (counter): builder calls by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder is installed
//! - Labels are static strings, never addresses or keys

use std::time::Duration;

use crate::blockchain::types::NodeQuery;

/// Record the outcome of one node query.
pub fn record_node_query(query: NodeQuery, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        "chain_auth_node_queries_total",
        "query" => query.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "chain_auth_node_query_duration_seconds",
        "query" => query.as_str()
    )
    .record(elapsed.as_secs_f64());
}

/// Record the outcome of one authorization build.
pub fn record_authorization(outcome: &'static str) {
    metrics::counter!("chain_auth_authorizations_total", "outcome" => outcome).increment(1);
}
