use crate::domain::payment::Request;
use crate::error::{PaymentError, Result};

/// One link of the validation chain. Checks its slice of the request.
pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, request: &Request<'_>) -> Result<()>;
}

/// Name must be non-empty and at least one contact channel present.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerValidator;

impl Validator for CustomerValidator {
    fn name(&self) -> &'static str {
        "customer"
    }

    fn validate(&self, request: &Request<'_>) -> Result<()> {
        let customer = request.customer;
        if customer.name.trim().is_empty() {
            return Err(PaymentError::validation("customer name must not be empty"));
        }
        if !customer.contact_info.has_channel() {
            return Err(PaymentError::validation(
                "customer must provide an email or a phone number",
            ));
        }
        Ok(())
    }
}

/// Source token must be non-empty and the amount strictly positive.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentDataValidator;

impl Validator for PaymentDataValidator {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn validate(&self, request: &Request<'_>) -> Result<()> {
        let payment = request.payment;
        if payment.source.trim().is_empty() {
            return Err(PaymentError::validation("payment source must not be empty"));
        }
        if payment.amount <= 0 {
            return Err(PaymentError::validation("amount must be positive"));
        }
        Ok(())
    }
}

/// Ordered, fail-fast sequence of validators.
///
/// The first failing validator ends the run; later validators never see the
/// request.
#[derive(Default)]
pub struct ValidationChain {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customer checks first, then payment checks.
    pub fn standard() -> Self {
        Self::new()
            .then(CustomerValidator)
            .then(PaymentDataValidator)
    }

    pub fn then(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn handle(&self, request: &Request<'_>) -> Result<()> {
        for validator in &self.validators {
            if let Err(e) = validator.validate(request) {
                tracing::debug!(validator = validator.name(), error = %e, "validation failed");
                return Err(e);
            }
        }
        Ok(())
    }
}
