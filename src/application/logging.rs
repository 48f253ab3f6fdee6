use super::service::PaymentOperations;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::error::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Decorator that wraps any [`PaymentOperations`] with start/finish log
/// markers. Results and errors are returned untouched.
pub struct LoggingPaymentService<S> {
    inner: S,
}

impl<S: PaymentOperations> LoggingPaymentService<S> {
    /// Wraps `inner` without changing its behavior.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the decorator, giving back the wrapped service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

fn finish(operation: &'static str, result: &Result<PaymentResponse>) {
    match result {
        Ok(response) => info!(
            operation,
            status = %response.status,
            transaction_id = ?response.transaction_id,
            "finish {operation}"
        ),
        Err(e) => warn!(operation, error = %e, "finish {operation} with error"),
    }
}

#[async_trait]
impl<S: PaymentOperations> PaymentOperations for LoggingPaymentService<S> {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        info!(customer = %customer.name, amount = payment.amount, "start process transaction");
        let result = self.inner.process_transaction(customer, payment).await;
        finish("process transaction", &result);
        result
    }

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse> {
        info!(transaction_id, "start process refund");
        let result = self.inner.process_refund(transaction_id).await;
        finish("process refund", &result);
        result
    }

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        info!(customer = %customer.name, amount = payment.amount, "start setup recurring");
        let result = self.inner.setup_recurring(customer, payment).await;
        finish("setup recurring", &result);
        result
    }
}
