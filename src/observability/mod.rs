//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization builder and node queries produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (query counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields, never key material
//! - Metrics go through the `metrics` facade; no exporter is owned here

pub mod logging;
pub mod metrics;
