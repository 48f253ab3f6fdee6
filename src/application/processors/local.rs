use super::synthetic_id;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::domain::ports::{PaymentProcessor, RecurringProcessor, RefundProcessor};
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Processes payments locally, for online payments outside the primary
/// gateway's currency. Supports every capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProcessor;

impl LocalProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProcessor for LocalProcessor {
    fn name(&self) -> &str {
        "local"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        info!(customer = %customer.name, amount = payment.amount, currency = %payment.currency, "processing local payment");
        Ok(PaymentResponse::success(
            payment.amount,
            synthetic_id("local"),
            "Local payment success",
        ))
    }

    fn as_refund(&self) -> Option<&dyn RefundProcessor> {
        Some(self)
    }

    fn as_recurring(&self) -> Option<&dyn RecurringProcessor> {
        Some(self)
    }
}

#[async_trait]
impl RefundProcessor for LocalProcessor {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        info!(transaction_id, "processing local refund");
        Ok(PaymentResponse::success(0, transaction_id, "Refund success"))
    }
}

#[async_trait]
impl RecurringProcessor for LocalProcessor {
    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        info!(customer = %customer.name, "setting up local recurring payment");
        Ok(PaymentResponse::success(
            payment.amount,
            synthetic_id("local"),
            "Recurring payment setup success",
        ))
    }
}
