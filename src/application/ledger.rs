//! Account ledger - owner of the balance invariants.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{DisplayHints, LedgerError};
use crate::ports::{LedgerStore, StoreError, TxAbort};

/// The account ledger.
///
/// Every balance mutation in the system funnels through [`adjust`], which
/// runs inside the store's per-document transaction. Without that, two
/// concurrent spends could both get past a balance that only supports one.
///
/// [`adjust`]: AccountLedger::adjust
#[derive(Clone)]
pub struct AccountLedger {
    store: Arc<dyn LedgerStore>,
}

impl AccountLedger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Creates the account lazily, or patches changed display hints.
    ///
    /// Idempotent; calling twice with the same hints writes nothing the
    /// second time. Creation runs through the transaction primitive so a
    /// concurrent credit cannot be overwritten by a fresh zero-balance
    /// document.
    pub async fn ensure_user(&self, id: UserId, hints: &DisplayHints) -> Result<(), LedgerError> {
        match self.store.get(id).await? {
            None => {
                let hints = hints.clone();
                self.store
                    .transact(
                        id,
                        Box::new(move |doc| {
                            doc.changed_hints(&hints).apply(doc);
                            Ok(())
                        }),
                    )
                    .await?;
            }
            Some(doc) => {
                let patch = doc.changed_hints(hints);
                if !patch.is_empty() {
                    self.store.update(id, patch).await?;
                }
            }
        }
        Ok(())
    }

    /// Current balance; unknown users read as zero.
    pub async fn balance(&self, id: UserId) -> Result<i64, LedgerError> {
        Ok(self
            .store
            .get(id)
            .await?
            .map(|doc| doc.balance)
            .unwrap_or(0))
    }

    /// Atomically applies `delta` (negative to debit, positive to credit)
    /// and returns the new balance.
    ///
    /// Creates the account inside the same atomic step when absent. Fails
    /// with [`LedgerError::InsufficientBalance`] when the result would be
    /// negative, leaving the balance untouched.
    pub async fn adjust(&self, id: UserId, delta: i64) -> Result<i64, LedgerError> {
        let result = self
            .store
            .transact(
                id,
                Box::new(move |doc| {
                    let next = doc.balance + delta;
                    if next < 0 {
                        return Err(TxAbort::InsufficientBalance {
                            balance: doc.balance,
                            debit: -delta,
                        });
                    }
                    doc.balance = next;
                    Ok(())
                }),
            )
            .await;

        match result {
            Ok(doc) => Ok(doc.balance),
            Err(StoreError::Aborted(TxAbort::InsufficientBalance { balance, debit })) => {
                Err(LedgerError::InsufficientBalance {
                    balance,
                    required: debit,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger_store::InMemoryLedgerStore;

    fn ledger() -> (AccountLedger, Arc<InMemoryLedgerStore>) {
        let store = Arc::new(InMemoryLedgerStore::new());
        (AccountLedger::new(store.clone()), store)
    }

    fn user() -> UserId {
        UserId::new(100)
    }

    #[tokio::test]
    async fn unknown_user_reads_as_zero() {
        let (ledger, _) = ledger();
        assert_eq!(ledger.balance(user()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let (ledger, store) = ledger();
        let hints = DisplayHints::new("luna", "Luna");

        ledger.ensure_user(user(), &hints).await.unwrap();
        let first = store.get(user()).await.unwrap().unwrap();

        ledger.ensure_user(user(), &hints).await.unwrap();
        let second = store.get(user()).await.unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(second.username, "luna");
    }

    #[tokio::test]
    async fn ensure_user_patches_changed_hints() {
        let (ledger, store) = ledger();
        ledger
            .ensure_user(user(), &DisplayHints::new("luna", "Luna"))
            .await
            .unwrap();
        ledger
            .ensure_user(user(), &DisplayHints::new("stella", "Luna"))
            .await
            .unwrap();

        let doc = store.get(user()).await.unwrap().unwrap();
        assert_eq!(doc.username, "stella");
    }

    #[tokio::test]
    async fn ensure_user_does_not_reset_an_existing_balance() {
        let (ledger, _) = ledger();
        ledger.adjust(user(), 25).await.unwrap();
        ledger
            .ensure_user(user(), &DisplayHints::new("luna", "Luna"))
            .await
            .unwrap();
        assert_eq!(ledger.balance(user()).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn adjust_credits_and_debits() {
        let (ledger, _) = ledger();
        assert_eq!(ledger.adjust(user(), 30).await.unwrap(), 30);
        assert_eq!(ledger.adjust(user(), -10).await.unwrap(), 20);
    }

    #[tokio::test]
    async fn overdraft_is_rejected_without_partial_effect() {
        let (ledger, _) = ledger();
        ledger.adjust(user(), 10).await.unwrap();

        let err = ledger.adjust(user(), -25).await.unwrap_err();
        match err {
            LedgerError::InsufficientBalance { balance, required } => {
                assert_eq!(balance, 10);
                assert_eq!(required, 25);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(ledger.balance(user()).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn concurrent_debits_never_overdraw() {
        // N concurrent debits of P against (N-1)*P: exactly one loses.
        const N: usize = 8;
        const P: i64 = 25;

        let (ledger, _) = ledger();
        ledger.adjust(user(), (N as i64 - 1) * P).await.unwrap();

        let tasks: Vec<_> = (0..N)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.adjust(user(), -P).await })
            })
            .collect();

        let mut ok = 0;
        let mut insufficient = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => ok += 1,
                Err(LedgerError::InsufficientBalance { .. }) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, N - 1);
        assert_eq!(insufficient, 1);
        assert_eq!(ledger.balance(user()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_outage_surfaces_as_store_error() {
        let (ledger, store) = ledger();
        store.set_unavailable(true);
        assert!(matches!(
            ledger.adjust(user(), 5).await,
            Err(LedgerError::Store(_))
        ));
    }

    // Property: after any sequence of adjustments, the balance equals the
    // sum of the deltas that were accepted, and is never negative.
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]
            #[test]
            fn balance_is_the_sum_of_accepted_deltas(deltas in proptest::collection::vec(-50i64..50, 1..40)) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                rt.block_on(async {
                    let store = Arc::new(InMemoryLedgerStore::new());
                    let ledger = AccountLedger::new(store);
                    let id = UserId::new(1);

                    let mut expected: i64 = 0;
                    for delta in deltas {
                        match ledger.adjust(id, delta).await {
                            Ok(new_balance) => {
                                expected += delta;
                                prop_assert_eq!(new_balance, expected);
                            }
                            Err(LedgerError::InsufficientBalance { .. }) => {
                                prop_assert!(expected + delta < 0);
                            }
                            Err(other) => return Err(TestCaseError::fail(other.to_string())),
                        }
                        prop_assert!(expected >= 0);
                    }
                    prop_assert_eq!(ledger.balance(id).await.unwrap(), expected);
                    Ok(())
                })?;
            }
        }
    }
}
