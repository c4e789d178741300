//! Ledger store port - the per-user document store.
//!
//! Mirrors the primitives of a document database: point reads, upserts,
//! partial updates, and an atomic read-modify-write transaction scoped to
//! one user document. Cross-user transactions are never needed since each
//! account is independent.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{AccountDocument, AccountPatch};

/// A mutation applied inside one atomic transaction.
///
/// Returning `Err(TxAbort)` rolls the transaction back; the stored
/// document is left exactly as it was.
pub type TransactOp<'a> = Box<dyn FnOnce(&mut AccountDocument) -> Result<(), TxAbort> + Send + 'a>;

/// Port for the account document store.
///
/// Implementations must linearize `transact` calls for the same user id:
/// no two concurrent transactions may observe a stale balance. An
/// unguarded read-then-write through `get`/`upsert` is exactly the bug
/// class `transact` exists to prevent; only `ensure_user`'s display-hint
/// patching may bypass it.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Point read of one account document.
    async fn get(&self, id: UserId) -> Result<Option<AccountDocument>, StoreError>;

    /// Creates or replaces one account document.
    async fn upsert(&self, id: UserId, doc: AccountDocument) -> Result<(), StoreError>;

    /// Partial update of display fields on an existing document.
    async fn update(&self, id: UserId, patch: AccountPatch) -> Result<(), StoreError>;

    /// Atomic read-modify-write of one account document.
    ///
    /// A default document (balance 0) is created inside the same atomic
    /// step when the user is unknown, before `op` runs. Returns the
    /// committed document.
    async fn transact(&self, id: UserId, op: TransactOp<'_>) -> Result<AccountDocument, StoreError>;
}

/// Domain-level reasons a transaction refuses to commit.
///
/// These are business aborts, not infrastructure failures: the store
/// rolled back cleanly and the caller decides what the abort means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TxAbort {
    /// The mutation would drive the balance below zero.
    #[error("balance {balance} cannot cover a debit of {debit}")]
    InsufficientBalance { balance: i64, debit: i64 },

    /// The daily free entitlement was already stamped for this date.
    #[error("free entitlement already granted today")]
    AlreadyGranted,
}

/// Errors from ledger store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store backend is unreachable or failing.
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),

    /// Optimistic retries were exhausted without a clean commit.
    #[error("transaction conflict persisted after {attempts} attempts")]
    ConflictExhausted { attempts: u32 },

    /// The transaction op aborted; nothing was written.
    #[error("transaction aborted: {0}")]
    Aborted(TxAbort),
}

impl StoreError {
    /// The abort reason, when this error is a clean business abort.
    pub fn abort_reason(&self) -> Option<TxAbort> {
        match self {
            StoreError::Aborted(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn LedgerStore) {}
    }

    #[test]
    fn abort_reason_extracts_business_aborts() {
        let err = StoreError::Aborted(TxAbort::AlreadyGranted);
        assert_eq!(err.abort_reason(), Some(TxAbort::AlreadyGranted));

        let err = StoreError::Unavailable("down".to_string());
        assert!(err.abort_reason().is_none());
    }

    #[test]
    fn insufficient_balance_display_names_amounts() {
        let abort = TxAbort::InsufficientBalance {
            balance: 10,
            debit: 25,
        };
        let text = abort.to_string();
        assert!(text.contains("10"));
        assert!(text.contains("25"));
    }
}
