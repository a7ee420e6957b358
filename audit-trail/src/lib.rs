//! Append-only structured audit logging for MedAssist Engine
//!
//! Every pipeline decision worth auditing is recorded as an
//! [`AuditEntry`] — timestamp, event type, JSON payload — and handed to
//! an [`AuditSink`]. Sinks are side-effect only: they never influence
//! control flow, and sink failures are the caller's to ignore or log.
//!
//! Two sinks ship with the crate:
//! - [`TracingSink`] emits entries as structured `tracing` events
//! - [`MemorySink`] retains entries in memory for test observability
//!
//! # Example
//!
//! ```rust
//! use audit_trail::{AuditEntry, AuditSink, TracingSink};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), audit_trail::AuditError> {
//! let sink = TracingSink::new();
//!
//! sink.log(AuditEntry::new(
//!     "retrieval",
//!     json!({ "query": "flu symptoms", "num_docs": 3 }),
//! ))
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod sink;

pub use entry::*;
pub use error::*;
pub use sink::*;
