//! Adapters - Implementations of the ports.
//!
//! In-memory adapters serve tests and single-instance deployments; the
//! Gemini adapter is the production generation provider. The production
//! document store and invoice transport live outside this crate behind
//! their ports.

pub mod generation;
pub mod ledger_store;
pub mod payment;
pub mod throttle;
