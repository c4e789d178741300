//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the outside world. Adapters implement these ports.
//!
//! - `LedgerStore` - per-user document store with an atomic transaction
//!   primitive; the load-bearing seam of the whole system
//! - `GenerationProvider` - opaque prompt-to-text call
//! - `PaymentGateway` - invoice issuing for credit top-ups
//! - `ThrottleGuard` - per-user cooldown gate

mod generation;
mod ledger_store;
mod payment_gateway;
mod throttle;

pub use generation::{AudioAttachment, GenerationError, GenerationProvider, GenerationRequest};
pub use ledger_store::{LedgerStore, StoreError, TransactOp, TxAbort};
pub use payment_gateway::{
    InvalidPayload, InvoiceRequest, PaymentConfirmation, PaymentGateway, PaymentGatewayError,
    TopUpPayload,
};
pub use throttle::ThrottleGuard;
