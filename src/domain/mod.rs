//! Domain layer - value objects and pure types.

pub mod foundation;
pub mod ledger;
pub mod reading;
