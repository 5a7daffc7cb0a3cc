//! Core services: identifier derivation, sentinel discovery, reconciliation,
//! aggregation and report assembly

pub mod aggregate;
pub mod identifier;
pub mod reconcile;
pub mod report;
pub mod sentinel;
