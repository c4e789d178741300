//! Ledger domain - account documents and balance invariants.

mod account;
mod errors;

pub use account::{AccountDocument, AccountPatch, DisplayHints};
pub use errors::LedgerError;
