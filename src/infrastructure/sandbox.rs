//! In-process gateway client.
//!
//! Mirrors the behaviour of a card gateway's test mode closely enough to run
//! the full orchestration (charges, refunds, customers, payment methods and
//! subscriptions) without network access.

use crate::domain::gateway::{
    Charge, ChargeRequest, GatewayCustomer, GatewayError, GatewayResult, PaymentMethod,
    Subscription, SubscriptionItem,
};
use crate::domain::ports::GatewayClient;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;

/// Source token that is always declined.
pub const DECLINED_TOKEN: &str = "tok_chargeDeclined";

pub const STATUS_SUCCEEDED: &str = "succeeded";
pub const STATUS_ACTIVE: &str = "active";

#[derive(Default)]
struct SandboxState {
    sequences: HashMap<&'static str, u64>,
    charges: HashMap<String, Charge>,
    refunded: HashSet<String>,
    customers: HashMap<String, GatewayCustomer>,
    // payment method id -> customer id
    attachments: HashMap<String, String>,
    prices: HashMap<String, i64>,
    subscriptions: HashMap<String, Subscription>,
}

impl SandboxState {
    fn next_id(&mut self, prefix: &'static str) -> String {
        let counter = self.sequences.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{prefix}_{counter}")
    }

    fn customer_mut(&mut self, customer_id: &str) -> GatewayResult<&mut GatewayCustomer> {
        self.customers
            .get_mut(customer_id)
            .ok_or_else(|| GatewayError::NotFound(format!("customer {customer_id}")))
    }
}

pub struct SandboxGateway {
    api_key: Option<String>,
    latency: Option<Duration>,
    state: Mutex<SandboxState>,
}

impl SandboxGateway {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            latency: None,
            state: Mutex::new(SandboxState::default()),
        }
    }

    /// Registers a recurring price.
    pub fn with_price(mut self, price_id: impl Into<String>, unit_amount: i64) -> Self {
        self.state
            .get_mut()
            .prices
            .insert(price_id.into(), unit_amount);
        self
    }

    /// Delays every call, to exercise caller timeouts.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn customer(&self, customer_id: &str) -> Option<GatewayCustomer> {
        self.state.lock().await.customers.get(customer_id).cloned()
    }

    pub async fn charge_count(&self) -> usize {
        self.state.lock().await.charges.len()
    }

    async fn enter(&self) -> GatewayResult<tokio::sync::MutexGuard<'_, SandboxState>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(self.state.lock().await),
            _ => Err(GatewayError::Authentication(
                "No API key provided".to_string(),
            )),
        }
    }
}

#[async_trait]
impl GatewayClient for SandboxGateway {
    async fn charge(&self, request: ChargeRequest) -> GatewayResult<Charge> {
        let mut state = self.enter().await?;
        if request.amount <= 0 {
            return Err(GatewayError::InvalidRequest(
                "amount must be at least 1".to_string(),
            ));
        }
        if request.source.is_empty() {
            return Err(GatewayError::InvalidRequest("missing source".to_string()));
        }
        if request.source == DECLINED_TOKEN {
            return Err(GatewayError::CardDeclined(
                "Your card was declined.".to_string(),
            ));
        }
        let charge = Charge {
            id: state.next_id("ch"),
            status: STATUS_SUCCEEDED.to_string(),
            amount: request.amount,
        };
        state.charges.insert(charge.id.clone(), charge.clone());
        Ok(charge)
    }

    async fn refund(&self, charge_id: &str) -> GatewayResult<Charge> {
        let mut state = self.enter().await?;
        let amount = state
            .charges
            .get(charge_id)
            .map(|charge| charge.amount)
            .ok_or_else(|| GatewayError::NotFound(format!("charge {charge_id}")))?;
        if !state.refunded.insert(charge_id.to_string()) {
            return Err(GatewayError::InvalidRequest(format!(
                "charge {charge_id} has already been refunded"
            )));
        }
        Ok(Charge {
            id: state.next_id("re"),
            status: STATUS_SUCCEEDED.to_string(),
            amount,
        })
    }

    async fn create_customer(&self, name: &str, email: &str) -> GatewayResult<GatewayCustomer> {
        let mut state = self.enter().await?;
        let customer = GatewayCustomer {
            id: state.next_id("cus"),
            name: name.to_string(),
            email: Some(email.to_string()),
            default_payment_method: None,
        };
        state
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<GatewayCustomer> {
        let mut state = self.enter().await?;
        state.customer_mut(customer_id).map(|c| c.clone())
    }

    async fn retrieve_payment_method(&self, source: &str) -> GatewayResult<PaymentMethod> {
        let _state = self.enter().await?;
        if source.starts_with("pm_") {
            return Ok(PaymentMethod {
                id: source.to_string(),
            });
        }
        match source.strip_prefix("tok_") {
            Some(brand) if !brand.is_empty() && source != DECLINED_TOKEN => Ok(PaymentMethod {
                id: format!("pm_{brand}"),
            }),
            Some(_) => Err(GatewayError::CardDeclined(
                "Your card was declined.".to_string(),
            )),
            None => Err(GatewayError::NotFound(format!("payment method {source}"))),
        }
    }

    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> GatewayResult<()> {
        let mut state = self.enter().await?;
        state.customer_mut(customer_id)?;
        state
            .attachments
            .insert(payment_method_id.to_string(), customer_id.to_string());
        Ok(())
    }

    async fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> GatewayResult<()> {
        let mut state = self.enter().await?;
        if state.attachments.get(payment_method_id).map(String::as_str) != Some(customer_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "payment method {payment_method_id} is not attached to customer {customer_id}"
            )));
        }
        state.customer_mut(customer_id)?.default_payment_method =
            Some(payment_method_id.to_string());
        Ok(())
    }

    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> GatewayResult<Subscription> {
        let mut state = self.enter().await?;
        if state.customer_mut(customer_id)?.default_payment_method.is_none() {
            return Err(GatewayError::InvalidRequest(format!(
                "customer {customer_id} has no default payment method"
            )));
        }
        let unit_amount = *state
            .prices
            .get(price_id)
            .ok_or_else(|| GatewayError::NotFound(format!("price {price_id}")))?;
        let subscription = Subscription {
            id: state.next_id("sub"),
            status: STATUS_ACTIVE.to_string(),
            items: vec![SubscriptionItem {
                price_id: price_id.to_string(),
                unit_amount: Some(unit_amount),
            }],
        };
        state
            .subscriptions
            .insert(subscription.id.clone(), subscription.clone());
        Ok(subscription)
    }
}
