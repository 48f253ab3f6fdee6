use crate::domain::customer::CustomerData;
use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CURRENCY: &str = "USD";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Offline,
    #[default]
    Online,
}

impl FromStr for PaymentType {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(PaymentType::Offline),
            "online" => Ok(PaymentType::Online),
            _ => Err(PaymentError::UnsupportedPaymentType(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Offline => f.write_str("offline"),
            PaymentType::Online => f.write_str("online"),
        }
    }
}

/// A single charge request.
///
/// `amount` is expressed in minor currency units (cents for USD). Positivity is
/// checked by validation, not on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    pub amount: i64,
    pub source: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "type", default)]
    pub payment_type: PaymentType,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl PaymentData {
    /// Online payment in the default currency.
    pub fn new(amount: i64, source: impl Into<String>) -> Self {
        Self {
            amount,
            source: source.into(),
            currency: default_currency(),
            payment_type: PaymentType::default(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    /// Amount in major units, e.g. `1500` USD cents is `15.00`.
    pub fn major_units(&self) -> Decimal {
        Decimal::new(self.amount, minor_unit_exponent(&self.currency))
    }
}

/// Number of decimal places used by the minor unit of a currency.
pub fn minor_unit_exponent(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" => 0,
        _ => 2,
    }
}

/// Outcome reported by a processor.
///
/// Gateway business failures are represented here with status `"failed"` rather
/// than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub status: String,
    pub amount: i64,
    pub transaction_id: Option<String>,
    pub message: Option<String>,
}

impl PaymentResponse {
    pub fn new(
        status: impl Into<String>,
        amount: i64,
        transaction_id: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            amount,
            transaction_id,
            message: Some(message.into()),
        }
    }

    pub fn success(amount: i64, transaction_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(STATUS_SUCCESS, amount, Some(transaction_id.into()), message)
    }

    pub fn failed(amount: i64, message: impl Into<String>) -> Self {
        Self::new(STATUS_FAILED, amount, None, message)
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_FAILED)
    }
}

/// Customer and payment paired for one pass through the validation chain.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub customer: &'a CustomerData,
    pub payment: &'a PaymentData,
}

impl<'a> Request<'a> {
    pub fn new(customer: &'a CustomerData, payment: &'a PaymentData) -> Self {
        Self { customer, payment }
    }
}

/// Event published to listeners once a processor call has returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentEvent {
    pub transaction_id: Option<String>,
    pub status: String,
    pub amount: i64,
}

impl From<&PaymentResponse> for PaymentEvent {
    fn from(response: &PaymentResponse) -> Self {
        Self {
            transaction_id: response.transaction_id.clone(),
            status: response.status.clone(),
            amount: response.amount,
        }
    }
}

impl fmt::Display for PaymentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payment {} for transaction {}",
            self.status,
            self.transaction_id.as_deref().unwrap_or("<none>")
        )
    }
}
