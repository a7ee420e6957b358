//! Audit sinks.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::entry::AuditEntry;
use crate::error::AuditResult;

/// Append-only destination for audit entries.
///
/// Implementations must not affect caller control flow; a failed write
/// surfaces as an error the caller may ignore.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn log(&self, entry: AuditEntry) -> AuditResult<()>;
}

/// Emits each entry as a structured tracing event with the serialized
/// payload attached
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for TracingSink {
    async fn log(&self, entry: AuditEntry) -> AuditResult<()> {
        let payload = serde_json::to_string(&entry.payload)?;
        info!(
            audit_id = %entry.id,
            timestamp = %entry.timestamp.to_rfc3339(),
            event_type = %entry.event_type,
            payload = %payload,
            "audit event"
        );
        Ok(())
    }
}

/// Retains entries in memory, for tests and local inspection
pub struct MemorySink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything logged so far, in append order
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MemorySink {
    async fn log(&self, entry: AuditEntry) -> AuditResult<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_sink_appends_in_order() {
        let sink = MemorySink::new();

        sink.log(AuditEntry::new("retrieval", json!({ "k": 3 })))
            .await
            .unwrap();
        sink.log(AuditEntry::new("orchestration", json!({ "used_rag": true })))
            .await
            .unwrap();

        let entries = sink.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event_type, "retrieval");
        assert_eq!(entries[1].event_type, "orchestration");
        assert_eq!(entries[1].payload["used_rag"], json!(true));
    }

    #[tokio::test]
    async fn tracing_sink_accepts_arbitrary_payloads() {
        let sink = TracingSink::new();

        sink.log(AuditEntry::new("orchestration", json!({ "num_sources": 2 })))
            .await
            .unwrap();
    }
}
