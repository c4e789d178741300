//! Daily free entitlement gate.

use std::sync::Arc;

use crate::domain::foundation::{CalendarDate, UserId};
use crate::ports::{LedgerStore, StoreError, TxAbort};

/// Gate for the once-per-day free reading.
///
/// The grant is a compare-and-stamp on `last_free_grant_date` executed
/// inside the store transaction, so two simultaneous requests on the same
/// day resolve to exactly one grant. A read-then-write version of this
/// check would hand out two free readings under concurrency.
#[derive(Clone)]
pub struct EntitlementGate {
    store: Arc<dyn LedgerStore>,
}

impl EntitlementGate {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Claims today's free entitlement.
    ///
    /// Returns `Ok(true)` when this call won the grant and the date was
    /// stamped, `Ok(false)` when it was already stamped for `date`.
    pub async fn grant_daily(&self, id: UserId, date: CalendarDate) -> Result<bool, StoreError> {
        let result = self
            .store
            .transact(
                id,
                Box::new(move |doc| {
                    if doc.last_free_grant_date == Some(date) {
                        return Err(TxAbort::AlreadyGranted);
                    }
                    doc.last_free_grant_date = Some(date);
                    Ok(())
                }),
            )
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(StoreError::Aborted(TxAbort::AlreadyGranted)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Returns a grant that could not be honored.
    ///
    /// Compensating action for a generation failure after the stamp: the
    /// user keeps their free try for the day. Clears the stamp only when
    /// it still carries `date`, so a grant won on a later day is never
    /// revoked by a stale failure path.
    pub async fn revoke_daily(&self, id: UserId, date: CalendarDate) -> Result<(), StoreError> {
        self.store
            .transact(
                id,
                Box::new(move |doc| {
                    if doc.last_free_grant_date == Some(date) {
                        doc.last_free_grant_date = None;
                    }
                    Ok(())
                }),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger_store::InMemoryLedgerStore;

    fn gate() -> EntitlementGate {
        EntitlementGate::new(Arc::new(InMemoryLedgerStore::new()))
    }

    fn user() -> UserId {
        UserId::new(7)
    }

    fn day(d: u32) -> CalendarDate {
        CalendarDate::from_ymd(2024, 6, d).unwrap()
    }

    #[tokio::test]
    async fn first_claim_of_the_day_wins() {
        let gate = gate();
        assert!(gate.grant_daily(user(), day(1)).await.unwrap());
    }

    #[tokio::test]
    async fn second_claim_same_day_is_denied() {
        let gate = gate();
        assert!(gate.grant_daily(user(), day(1)).await.unwrap());
        assert!(!gate.grant_daily(user(), day(1)).await.unwrap());
    }

    #[tokio::test]
    async fn next_day_resets_the_gate() {
        let gate = gate();
        assert!(gate.grant_daily(user(), day(1)).await.unwrap());
        assert!(gate.grant_daily(user(), day(2)).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_claims_grant_exactly_once() {
        let gate = gate();
        let claims = futures::future::join_all(
            (0..10).map(|_| gate.grant_daily(user(), day(1))),
        )
        .await;

        let granted = claims
            .into_iter()
            .filter(|claim| *claim.as_ref().unwrap())
            .count();
        assert_eq!(granted, 1);
    }

    #[tokio::test]
    async fn revoke_reopens_the_same_day() {
        let gate = gate();
        assert!(gate.grant_daily(user(), day(1)).await.unwrap());
        gate.revoke_daily(user(), day(1)).await.unwrap();
        assert!(gate.grant_daily(user(), day(1)).await.unwrap());
    }

    #[tokio::test]
    async fn revoke_ignores_a_stale_date() {
        let gate = gate();
        assert!(gate.grant_daily(user(), day(2)).await.unwrap());
        gate.revoke_daily(user(), day(1)).await.unwrap();
        assert!(!gate.grant_daily(user(), day(2)).await.unwrap());
    }
}
