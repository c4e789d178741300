//! Error types for ledger operations.

use thiserror::Error;

use crate::ports::StoreError;

/// Errors surfaced by the account ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The debit would drive the balance negative. The balance is left
    /// unchanged; callers route this to the payment flow, never to the
    /// end user as a raw error.
    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: i64, required: i64 },

    /// The underlying document store failed; fatal for the interaction.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// True for the locally-recoverable insufficient-funds case.
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, LedgerError::InsufficientBalance { .. })
    }
}
