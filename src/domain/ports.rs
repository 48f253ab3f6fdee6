use super::customer::CustomerData;
use super::gateway::{
    Charge, ChargeRequest, GatewayCustomer, GatewayResult, PaymentMethod, Subscription,
};
use super::payment::{PaymentData, PaymentResponse};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Executes charges against one backend.
///
/// Refunds and recurring billing are optional capabilities: a backend that
/// supports them overrides `as_refund` / `as_recurring` to expose itself.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    fn name(&self) -> &str;

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;

    fn as_refund(&self) -> Option<&dyn RefundProcessor> {
        None
    }

    fn as_recurring(&self) -> Option<&dyn RecurringProcessor> {
        None
    }
}

#[async_trait]
pub trait RefundProcessor: Send + Sync {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse>;
}

#[async_trait]
pub trait RecurringProcessor: Send + Sync {
    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;
}

/// Sends the post-payment confirmation to the customer.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;

    async fn send_confirmation(&self, customer: &CustomerData) -> Result<()>;
}

/// Fire-and-forget message delivery (SMTP relay, SMS gateway, ...).
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, destination: &str, content: &str) -> Result<()>;
}

/// Append-only, line oriented audit sink.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, line: &str) -> Result<()>;
}

/// Subscriber to events of type `E`.
#[async_trait]
pub trait Listener<E: Sync>: Send + Sync {
    async fn notify(&self, event: &E) -> Result<()>;
}

/// Remote card-processing API.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn charge(&self, request: ChargeRequest) -> GatewayResult<Charge>;
    async fn refund(&self, charge_id: &str) -> GatewayResult<Charge>;
    async fn create_customer(&self, name: &str, email: &str) -> GatewayResult<GatewayCustomer>;
    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<GatewayCustomer>;
    async fn retrieve_payment_method(&self, source: &str) -> GatewayResult<PaymentMethod>;
    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> GatewayResult<()>;
    async fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> GatewayResult<()>;
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> GatewayResult<Subscription>;
}

pub type ProcessorHandle = Arc<dyn PaymentProcessor>;
pub type NotifierBox = Box<dyn Notifier>;
pub type AuditLogHandle = Arc<dyn AuditLog>;
pub type TransportHandle = Arc<dyn MessageTransport>;
pub type GatewayClientHandle = Arc<dyn GatewayClient>;
