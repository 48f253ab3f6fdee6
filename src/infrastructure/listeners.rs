use crate::domain::payment::PaymentEvent;
use crate::domain::ports::Listener;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Records every payment event in the accounting trail.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccountabilityListener;

#[async_trait]
impl Listener<PaymentEvent> for AccountabilityListener {
    async fn notify(&self, event: &PaymentEvent) -> Result<()> {
        info!(
            transaction_id = ?event.transaction_id,
            status = %event.status,
            amount = event.amount,
            "notifying event: {event}"
        );
        Ok(())
    }
}
