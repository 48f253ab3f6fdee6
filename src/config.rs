//! Environment-driven settings.

use crate::error::{PaymentError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PRICE_ID: &str = "price_default";
pub const DEFAULT_AUDIT_LOG_PATH: &str = "transactions.log";
pub const DEFAULT_SMS_GATEWAY: &str = "SMSGatewayExample";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Secret API key. Without it every gateway call fails fatally.
    pub api_key: Option<String>,
    /// Price (plan) identifier used for recurring subscriptions.
    pub price_id: String,
    /// Upper bound for a single gateway call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub audit_log_path: PathBuf,
    pub sms_gateway: String,
}

impl Settings {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("GATEWAY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!("Invalid GATEWAY_TIMEOUT_SECS: {raw}"))
            })?,
            None => DEFAULT_GATEWAY_TIMEOUT_SECS,
        };

        Ok(Settings {
            gateway: GatewaySettings {
                api_key: non_empty("GATEWAY_API_KEY"),
                price_id: non_empty("GATEWAY_PRICE_ID")
                    .unwrap_or_else(|| DEFAULT_PRICE_ID.to_string()),
                timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            },
            audit_log_path: non_empty("AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG_PATH)),
            sms_gateway: non_empty("SMS_GATEWAY")
                .unwrap_or_else(|| DEFAULT_SMS_GATEWAY.to_string()),
        })
    }
}
