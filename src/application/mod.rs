//! Application layer: the payment orchestration core.
//!
//! A request enters [`service::PaymentService`], passes the fail-fast
//! [`validation::ValidationChain`], is executed by the processor chosen by
//! [`selector::select`], and fans out to listeners, the customer notifier and
//! the audit log. [`logging::LoggingPaymentService`] wraps the whole call.

pub mod audit;
pub mod builder;
pub mod listeners;
pub mod logging;
pub mod notifier;
pub mod processors;
pub mod selector;
pub mod service;
pub mod validation;
