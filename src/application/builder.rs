use super::audit::TransactionLogger;
use super::listeners::ListenerRegistry;
use super::notifier::{NotificationChannels, select_notifier};
use super::selector::Backends;
use super::service::{FailedResponsePolicy, PaymentService};
use super::validation::ValidationChain;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentEvent};
use crate::domain::ports::{AuditLogHandle, NotifierBox, ProcessorHandle};
use crate::error::{PaymentError, Result};
use std::sync::Arc;

/// Step-by-step assembly of a [`PaymentService`].
///
/// `build` fails with [`PaymentError::MissingDependencies`] naming every
/// collaborator that was not provided.
#[derive(Default)]
pub struct PaymentServiceBuilder {
    processor: Option<ProcessorHandle>,
    notifier: Option<NotifierBox>,
    validators: Option<ValidationChain>,
    logger: Option<TransactionLogger>,
    listeners: Option<Arc<ListenerRegistry<PaymentEvent>>>,
    failure_policy: FailedResponsePolicy,
}

impl PaymentServiceBuilder {
    /// Creates an empty builder; every collaborator still has to be supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `sink` in a [`TransactionLogger`] for audit entries.
    pub fn with_logger(mut self, sink: AuditLogHandle) -> Self {
        self.logger = Some(TransactionLogger::new(sink));
        self
    }

    /// Uses `processor` for every operation of the built service.
    pub fn with_processor(mut self, processor: ProcessorHandle) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Picks the processor for `payment` from the backend table.
    pub fn with_processor_for(self, backends: &Backends, payment: &PaymentData) -> Self {
        self.with_processor(backends.processor_for(payment))
    }

    /// Replaces the validation chain run before the processor.
    pub fn with_validators(mut self, validators: ValidationChain) -> Self {
        self.validators = Some(validators);
        self
    }

    /// Customer checks followed by payment checks.
    pub fn with_default_validations(self) -> Self {
        self.with_validators(ValidationChain::standard())
    }

    /// Sets the confirmation channel explicitly.
    pub fn with_notifier(mut self, notifier: NotifierBox) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Selects the confirmation channel from the customer's contact data.
    pub fn with_notifier_for(
        self,
        customer: &CustomerData,
        channels: &NotificationChannels,
    ) -> Result<Self> {
        Ok(self.with_notifier(select_notifier(customer, channels)?))
    }

    /// Shares an existing listener registry with the service.
    pub fn with_listeners(mut self, listeners: Arc<ListenerRegistry<PaymentEvent>>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Defaults to [`FailedResponsePolicy::SkipNotifications`].
    pub fn with_failure_policy(mut self, policy: FailedResponsePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Assembles the service.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::MissingDependencies`] listing the absent
    /// collaborators in the order processor, notifier, validator, logger,
    /// listeners.
    pub fn build(self) -> Result<PaymentService> {
        let missing: Vec<&'static str> = [
            ("payment_processor", self.processor.is_none()),
            ("notifier", self.notifier.is_none()),
            ("validator", self.validators.is_none()),
            ("logger", self.logger.is_none()),
            ("listeners", self.listeners.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (
            self.processor,
            self.validators,
            self.notifier,
            self.logger,
            self.listeners,
        ) {
            (Some(processor), Some(validators), Some(notifier), Some(logger), Some(listeners)) => {
                Ok(
                    PaymentService::new(processor, validators, notifier, logger, listeners)
                        .with_failure_policy(self.failure_policy),
                )
            }
            _ => Err(PaymentError::MissingDependencies(missing)),
        }
    }
}
