use crate::domain::payment::{DEFAULT_CURRENCY, PaymentData, PaymentType};
use crate::domain::ports::ProcessorHandle;
use std::fmt;

/// Concrete backend chosen for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Transaction-only, no external system involved.
    Offline,
    /// Card gateway: transactions, refunds and recurring billing.
    PrimaryGateway,
    /// Local simulation with the full capability set, used for non-USD online payments.
    Local,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Offline => f.write_str("offline"),
            Backend::PrimaryGateway => f.write_str("gateway"),
            Backend::Local => f.write_str("local"),
        }
    }
}

/// Pure mapping from payment type and currency to a backend.
///
/// Unknown payment types are rejected earlier, when the type is parsed
/// (see `PaymentType::from_str`).
pub fn select(payment: &PaymentData) -> Backend {
    match (payment.payment_type, payment.currency.as_str()) {
        (PaymentType::Offline, _) => Backend::Offline,
        (PaymentType::Online, DEFAULT_CURRENCY) => Backend::PrimaryGateway,
        (PaymentType::Online, _) => Backend::Local,
    }
}

/// One processor handle per backend.
#[derive(Clone)]
pub struct Backends {
    pub offline: ProcessorHandle,
    pub primary: ProcessorHandle,
    pub local: ProcessorHandle,
}

impl Backends {
    /// Handle registered for `backend`.
    pub fn get(&self, backend: Backend) -> ProcessorHandle {
        match backend {
            Backend::Offline => self.offline.clone(),
            Backend::PrimaryGateway => self.primary.clone(),
            Backend::Local => self.local.clone(),
        }
    }

    /// Runs [`select`] on `payment` and returns the matching handle.
    pub fn processor_for(&self, payment: &PaymentData) -> ProcessorHandle {
        let backend = select(payment);
        tracing::debug!(%backend, currency = %payment.currency, "backend selected");
        self.get(backend)
    }
}
