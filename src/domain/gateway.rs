//! Data exchanged with a card-processing gateway.

use thiserror::Error;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount: i64,
    pub currency: String,
    pub source: String,
    pub description: String,
}

/// A charge or a refund as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub id: String,
    pub status: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCustomer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub default_payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionItem {
    pub price_id: String,
    pub unit_amount: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    pub items: Vec<SubscriptionItem>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("card declined: {0}")]
    CardDeclined(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("no such resource: {0}")]
    NotFound(String),
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
}

impl GatewayError {
    /// Credential problems cannot be fixed by retrying with other payment data,
    /// so they escape as errors instead of becoming a failed response.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GatewayError::Authentication(_))
    }
}
