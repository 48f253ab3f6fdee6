//! Domain layer: the data exchanged with the orchestrator and the ports
//! (async traits) through which it reaches every collaborator.

pub mod customer;
pub mod gateway;
pub mod payment;
pub mod ports;
