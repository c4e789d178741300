//! Application layer - the balance-and-entitlement core services.
//!
//! These compose the ports into the behaviors the bot wiring calls:
//! account ledger, daily entitlement gate, charge orchestration with
//! refund-on-failure, the two-phase reading flow, and top-up crediting.

pub mod charge;
pub mod daily;
pub mod entitlement;
pub mod ledger;
pub mod payment;
pub mod reading;
pub mod session;

pub use charge::{ChargeError, ChargeOrchestrator, ChargeOutcome, DebitOutcome, SettleOutcome};
pub use daily::{DailyOutcome, DailyReading};
pub use entitlement::EntitlementGate;
pub use ledger::AccountLedger;
pub use payment::TopUpService;
pub use reading::{AdviceOutcome, BeginOutcome, ContextOutcome, ReadingFlow, ReadingInput};
pub use session::{ReadingSession, ReadingSessionStore, SessionClaim};
