use crate::config::GatewaySettings;
use crate::domain::customer::CustomerData;
use crate::domain::gateway::{ChargeRequest, GatewayError, GatewayResult};
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::domain::ports::{
    GatewayClientHandle, PaymentProcessor, RecurringProcessor, RefundProcessor,
};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// Processor backed by the primary card gateway.
///
/// Business failures reported by the gateway (declines, unknown resources,
/// timeouts) come back as a `"failed"` [`PaymentResponse`]. Credential problems
/// are returned as [`PaymentError::Configuration`].
pub struct GatewayProcessor {
    client: GatewayClientHandle,
    price_id: String,
    timeout: Option<Duration>,
}

enum SetupError {
    Gateway(GatewayError),
    Fatal(PaymentError),
}

impl From<GatewayError> for SetupError {
    fn from(err: GatewayError) -> Self {
        SetupError::Gateway(err)
    }
}

impl GatewayProcessor {
    pub fn new(client: GatewayClientHandle, price_id: impl Into<String>) -> Self {
        Self {
            client,
            price_id: price_id.into(),
            timeout: None,
        }
    }

    pub fn from_settings(client: GatewayClientHandle, settings: &GatewaySettings) -> Self {
        Self::new(client, settings.price_id.clone()).with_timeout(settings.timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call<T, F>(&self, operation: &'static str, fut: F) -> GatewayResult<T>
    where
        T: Send,
        F: Future<Output = GatewayResult<T>> + Send,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
                Err(GatewayError::Unavailable(format!(
                    "{operation} timed out after {}ms",
                    limit.as_millis()
                )))
            }),
            None => fut.await,
        }
    }

    async fn find_or_create_customer(
        &self,
        customer: &CustomerData,
    ) -> std::result::Result<String, SetupError> {
        if let Some(id) = customer.customer_id() {
            let existing = self
                .call("retrieve_customer", self.client.retrieve_customer(id))
                .await?;
            info!(customer_id = %existing.id, "customer retrieved");
            return Ok(existing.id);
        }

        let email = customer
            .contact_info
            .email()
            .ok_or(SetupError::Fatal(PaymentError::MissingEmail))?;
        let created = self
            .call(
                "create_customer",
                self.client.create_customer(&customer.name, email),
            )
            .await?;
        info!(customer_id = %created.id, "customer created");
        Ok(created.id)
    }

    async fn subscribe(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> std::result::Result<PaymentResponse, SetupError> {
        let customer_id = self.find_or_create_customer(customer).await?;

        let method = self
            .call(
                "retrieve_payment_method",
                self.client.retrieve_payment_method(&payment.source),
            )
            .await?;
        self.call(
            "attach_payment_method",
            self.client.attach_payment_method(&method.id, &customer_id),
        )
        .await?;
        info!(payment_method = %method.id, %customer_id, "payment method attached");

        self.call(
            "set_default_payment_method",
            self.client
                .set_default_payment_method(&customer_id, &method.id),
        )
        .await?;

        let subscription = self
            .call(
                "create_subscription",
                self.client.create_subscription(&customer_id, &self.price_id),
            )
            .await?;

        let amount = subscription
            .items
            .first()
            .and_then(|item| item.unit_amount)
            .ok_or_else(|| {
                GatewayError::InvalidRequest(format!(
                    "subscription {} has no billing lines",
                    subscription.id
                ))
            })?;

        Ok(PaymentResponse::new(
            subscription.status,
            amount,
            Some(subscription.id),
            "Recurring payment setup successful",
        ))
    }
}

fn capture(err: GatewayError, amount: i64, operation: &str) -> Result<PaymentResponse> {
    if err.is_fatal() {
        error!(operation, error = %err, "gateway rejected credentials");
        return Err(PaymentError::Configuration(err.to_string()));
    }
    warn!(operation, error = %err, "gateway call failed");
    Ok(PaymentResponse::failed(amount, err.to_string()))
}

#[async_trait]
impl PaymentProcessor for GatewayProcessor {
    fn name(&self) -> &str {
        "gateway"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let request = ChargeRequest {
            amount: payment.amount,
            currency: payment.currency.to_ascii_lowercase(),
            source: payment.source.clone(),
            description: format!("Charge for {}", customer.name),
        };
        match self.call("charge", self.client.charge(request)).await {
            Ok(charge) => {
                info!(charge_id = %charge.id, status = %charge.status, "payment successful");
                Ok(PaymentResponse::new(
                    charge.status,
                    charge.amount,
                    Some(charge.id),
                    "Payment successful",
                ))
            }
            Err(e) => capture(e, payment.amount, "charge"),
        }
    }

    fn as_refund(&self) -> Option<&dyn RefundProcessor> {
        Some(self)
    }

    fn as_recurring(&self) -> Option<&dyn RecurringProcessor> {
        Some(self)
    }
}

#[async_trait]
impl RefundProcessor for GatewayProcessor {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        match self.call("refund", self.client.refund(transaction_id)).await {
            Ok(refund) => {
                info!(refund_id = %refund.id, "refund successful");
                Ok(PaymentResponse::new(
                    refund.status,
                    refund.amount,
                    Some(refund.id),
                    "Refund successful",
                ))
            }
            Err(e) => capture(e, 0, "refund"),
        }
    }
}

#[async_trait]
impl RecurringProcessor for GatewayProcessor {
    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        match self.subscribe(customer, payment).await {
            Ok(response) => {
                info!(subscription_id = ?response.transaction_id, "recurring payment setup successful");
                Ok(response)
            }
            Err(SetupError::Gateway(e)) => capture(e, 0, "recurring"),
            Err(SetupError::Fatal(e)) => Err(e),
        }
    }
}
