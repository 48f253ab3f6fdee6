use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::domain::ports::AuditLogHandle;
use crate::error::Result;

/// Formats transaction outcomes into audit lines. Each call performs exactly
/// one append on the sink.
#[derive(Clone)]
pub struct TransactionLogger {
    sink: AuditLogHandle,
}

impl TransactionLogger {
    pub fn new(sink: AuditLogHandle) -> Self {
        Self { sink }
    }

    pub async fn log_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> Result<()> {
        self.sink
            .append(&transaction_line(customer, payment, response))
            .await
    }

    pub async fn log_refund(&self, transaction_id: &str, response: &PaymentResponse) -> Result<()> {
        self.sink
            .append(&refund_line(transaction_id, response))
            .await
    }
}

pub fn transaction_line(
    customer: &CustomerData,
    payment: &PaymentData,
    response: &PaymentResponse,
) -> String {
    let mut line = format!(
        "{} paid {} {} | status={}",
        customer.name,
        payment.major_units(),
        payment.currency,
        response.status
    );
    if let Some(id) = &response.transaction_id {
        line.push_str(&format!(" | transaction_id={id}"));
    }
    line.push_str(&format!(
        " | message={}",
        response.message.as_deref().unwrap_or("")
    ));
    line
}

pub fn refund_line(transaction_id: &str, response: &PaymentResponse) -> String {
    format!(
        "refund processed for transaction {transaction_id} | status={} | message={}",
        response.status,
        response.message.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::ContactInfo;
    use crate::infrastructure::in_memory::InMemoryAuditLog;
    use std::sync::Arc;

    fn jon() -> CustomerData {
        CustomerData::new("Jon Doe", ContactInfo::with_email("jon.doe@mail.co"))
    }

    #[test]
    fn test_transaction_line() {
        let line = transaction_line(
            &jon(),
            &PaymentData::new(1500, "tok_visa"),
            &PaymentResponse::new("succeeded", 1500, Some("ch_1".into()), "Payment successful"),
        );
        assert_eq!(
            line,
            "Jon Doe paid 15.00 USD | status=succeeded | transaction_id=ch_1 | message=Payment successful"
        );
    }

    #[test]
    fn test_transaction_line_without_id() {
        let line = transaction_line(
            &jon(),
            &PaymentData::new(250, "tok_visa"),
            &PaymentResponse::failed(250, "card declined"),
        );
        assert_eq!(line, "Jon Doe paid 2.50 USD | status=failed | message=card declined");
    }

    #[test]
    fn test_refund_line() {
        let line = refund_line("ch_1", &PaymentResponse::success(0, "re_1", "Refund success"));
        assert_eq!(
            line,
            "refund processed for transaction ch_1 | status=success | message=Refund success"
        );
    }

    #[tokio::test]
    async fn test_logger_appends_once_per_call() {
        let sink = Arc::new(InMemoryAuditLog::new());
        let logger = TransactionLogger::new(sink.clone());

        logger
            .log_transaction(
                &jon(),
                &PaymentData::new(1500, "tok_visa"),
                &PaymentResponse::success(1500, "ch_1", "ok"),
            )
            .await
            .unwrap();
        logger
            .log_refund("ch_1", &PaymentResponse::success(0, "re_1", "ok"))
            .await
            .unwrap();

        let lines = sink.lines().await;
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("refund processed"));
    }
}
