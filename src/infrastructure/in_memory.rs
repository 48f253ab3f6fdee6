use crate::domain::ports::{AuditLog, MessageTransport};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Audit sink that keeps every appended line in memory.
///
/// Clones share the same buffer. Useful for tests and dry runs.
#[derive(Default, Clone)]
pub struct InMemoryAuditLog {
    lines: Arc<RwLock<Vec<String>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.read().await.clone()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, line: &str) -> Result<()> {
        self.lines.write().await.push(line.to_string());
        Ok(())
    }
}

/// Transport that records `(destination, content)` pairs instead of sending.
#[derive(Default, Clone)]
pub struct InMemoryOutbox {
    messages: Arc<RwLock<Vec<(String, String)>>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<(String, String)> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MessageTransport for InMemoryOutbox {
    async fn send(&self, destination: &str, content: &str) -> Result<()> {
        self.messages
            .write()
            .await
            .push((destination.to_string(), content.to_string()));
        Ok(())
    }
}
