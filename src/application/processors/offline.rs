use super::synthetic_id;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::domain::ports::PaymentProcessor;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Records cash or other out-of-band payments. Transaction capability only.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProcessor;

impl OfflineProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProcessor for OfflineProcessor {
    fn name(&self) -> &str {
        "offline"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        info!(customer = %customer.name, amount = payment.amount, "processing offline payment");
        Ok(PaymentResponse::success(
            payment.amount,
            synthetic_id("offline"),
            "Offline payment success",
        ))
    }
}
