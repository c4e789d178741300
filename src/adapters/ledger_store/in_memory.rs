//! In-memory ledger store for testing and single-instance deployments.
//!
//! Transactions are linearized by holding the document map's write lock
//! for the whole read-modify-write, which satisfies the store contract
//! within one process. Not suitable for multi-instance deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{AccountDocument, AccountPatch};
use crate::ports::{LedgerStore, StoreError, TransactOp};

/// In-memory implementation of [`LedgerStore`].
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    docs: Arc<RwLock<HashMap<UserId, AccountDocument>>>,
    /// When set, every operation fails; lets tests exercise the
    /// store-unavailable paths.
    unavailable: Arc<AtomicBool>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    /// Number of stored account documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether no accounts exist yet.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get(&self, id: UserId) -> Result<Option<AccountDocument>, StoreError> {
        self.check_available()?;
        Ok(self.docs.read().await.get(&id).cloned())
    }

    async fn upsert(&self, id: UserId, doc: AccountDocument) -> Result<(), StoreError> {
        self.check_available()?;
        self.docs.write().await.insert(id, doc);
        Ok(())
    }

    async fn update(&self, id: UserId, patch: AccountPatch) -> Result<(), StoreError> {
        self.check_available()?;
        let mut docs = self.docs.write().await;
        if let Some(doc) = docs.get_mut(&id) {
            patch.apply(doc);
        }
        Ok(())
    }

    async fn transact(&self, id: UserId, op: TransactOp<'_>) -> Result<AccountDocument, StoreError> {
        self.check_available()?;

        // The write lock is held across the whole read-modify-write; this
        // is what linearizes concurrent transactions on one document.
        let mut docs = self.docs.write().await;
        let mut doc = docs.get(&id).cloned().unwrap_or_default();
        op(&mut doc).map_err(StoreError::Aborted)?;
        docs.insert(id, doc.clone());
        Ok(doc)
    }
}
