use crate::domain::ports::MessageTransport;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Transport that writes messages to the log instead of delivering them.
#[derive(Debug, Clone)]
pub struct ConsoleTransport {
    channel: &'static str,
}

impl ConsoleTransport {
    pub fn email() -> Self {
        Self { channel: "email" }
    }

    pub fn sms() -> Self {
        Self { channel: "sms" }
    }
}

#[async_trait]
impl MessageTransport for ConsoleTransport {
    async fn send(&self, destination: &str, content: &str) -> Result<()> {
        info!(channel = self.channel, destination, content, "message dispatched");
        Ok(())
    }
}
