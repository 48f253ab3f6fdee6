use super::audit::TransactionLogger;
use super::listeners::ListenerRegistry;
use super::validation::ValidationChain;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentEvent, PaymentResponse, Request};
use crate::domain::ports::{NotifierBox, ProcessorHandle};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Public contract of the orchestrator, shared by [`PaymentService`] and its
/// decorators.
#[async_trait]
pub trait PaymentOperations: Send + Sync {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse>;

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;
}

/// What to do with listeners and the customer confirmation when the
/// processor returns a `"failed"` response. The audit entry is written in
/// both cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailedResponsePolicy {
    #[default]
    SkipNotifications,
    NotifyAnyway,
}

/// Orchestrates one payment: validation, processing, listener fan-out,
/// customer confirmation and audit logging, in that order.
///
/// Collaborators are fixed at build time (see
/// [`PaymentServiceBuilder`](super::builder::PaymentServiceBuilder)); only the
/// notifier can be swapped afterwards.
pub struct PaymentService {
    processor: ProcessorHandle,
    validators: ValidationChain,
    notifier: NotifierBox,
    logger: TransactionLogger,
    listeners: Arc<ListenerRegistry<PaymentEvent>>,
    failure_policy: FailedResponsePolicy,
}

impl PaymentService {
    /// Creates a new `PaymentService` with the default
    /// [`FailedResponsePolicy`].
    ///
    /// # Arguments
    ///
    /// * `processor` - The backend that charges, refunds or subscribes.
    /// * `validators` - Checks run on every request before the processor.
    /// * `notifier` - Sends the customer confirmation.
    /// * `logger` - Formats and appends audit entries.
    /// * `listeners` - Subscribers to the payment event fan-out.
    pub fn new(
        processor: ProcessorHandle,
        validators: ValidationChain,
        notifier: NotifierBox,
        logger: TransactionLogger,
        listeners: Arc<ListenerRegistry<PaymentEvent>>,
    ) -> Self {
        Self {
            processor,
            validators,
            notifier,
            logger,
            listeners,
            failure_policy: FailedResponsePolicy::default(),
        }
    }

    /// Replaces the policy applied to `"failed"` processor responses.
    pub fn with_failure_policy(mut self, policy: FailedResponsePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Swaps the confirmation channel for subsequent payments.
    pub fn set_notifier(&mut self, notifier: NotifierBox) {
        info!(
            from = self.notifier.channel(),
            to = notifier.channel(),
            "changing notifier implementation"
        );
        self.notifier = notifier;
    }

    pub fn notifier_channel(&self) -> &'static str {
        self.notifier.channel()
    }

    pub fn processor_name(&self) -> &str {
        self.processor.name()
    }

    /// Shared registry, so listeners can be added or removed after build.
    pub fn listeners(&self) -> &Arc<ListenerRegistry<PaymentEvent>> {
        &self.listeners
    }

    /// Whether the configured processor exposes the refund capability.
    pub fn supports_refunds(&self) -> bool {
        self.processor.as_refund().is_some()
    }

    pub fn supports_recurring(&self) -> bool {
        self.processor.as_recurring().is_some()
    }

    fn unsupported(&self, capability: &str) -> PaymentError {
        PaymentError::UnsupportedOperation(format!(
            "{} processor does not support {capability}",
            self.processor.name()
        ))
    }
}

#[async_trait]
impl PaymentOperations for PaymentService {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        if let Err(e) = self.validators.handle(&Request::new(customer, payment)) {
            warn!(error = %e, "payment rejected by validation");
            return Err(e);
        }

        let response = self
            .processor
            .process_transaction(customer, payment)
            .await?;

        if response.is_failed() && self.failure_policy == FailedResponsePolicy::SkipNotifications {
            debug!(message = ?response.message, "failed payment, skipping listeners and confirmation");
        } else {
            self.listeners
                .notify_all(&PaymentEvent::from(&response))
                .await?;
            // Confirmation is best-effort: the charge already happened.
            if let Err(e) = self.notifier.send_confirmation(customer).await {
                warn!(channel = self.notifier.channel(), error = %e, "confirmation not sent");
            }
        }

        // Audit is best-effort too: the response is returned either way.
        if let Err(e) = self.logger.log_transaction(customer, payment, &response).await {
            warn!(error = %e, "audit entry not written");
        }
        Ok(response)
    }

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse> {
        let refunds = self
            .processor
            .as_refund()
            .ok_or_else(|| self.unsupported("refunds"))?;
        let response = refunds.refund_payment(transaction_id).await?;
        if let Err(e) = self.logger.log_refund(transaction_id, &response).await {
            warn!(error = %e, "audit entry not written");
        }
        Ok(response)
    }

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let recurring = self
            .processor
            .as_recurring()
            .ok_or_else(|| self.unsupported("recurring payments"))?;
        let response = recurring.setup_recurring_payment(customer, payment).await?;
        if let Err(e) = self.logger.log_transaction(customer, payment, &response).await {
            warn!(error = %e, "audit entry not written");
        }
        Ok(response)
    }
}
