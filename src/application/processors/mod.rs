//! Processor capabilities: one implementation per backend.

pub mod gateway;
pub mod local;
pub mod offline;

/// Synthetic identifier for backends that never talk to a gateway.
pub(crate) fn synthetic_id(prefix: &str) -> String {
    format!("{prefix}-transaction-id-{}", uuid::Uuid::new_v4())
}
