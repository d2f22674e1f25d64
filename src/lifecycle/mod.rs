//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Caller creates Cancellation
//!     → CallContext (cancel.rs) wraps it with an optional deadline
//!     → every node query runs through CallContext::run
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Cancellation::cancel → pending query dropped
//! ```

pub mod cancel;
pub mod signals;

pub use cancel::{CallContext, Cancellation};
