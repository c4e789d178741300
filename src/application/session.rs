//! Open reading sessions awaiting a context message.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::reading::{ChargeBasis, ReadingKind};

/// A paid reading waiting for the user's follow-up context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingSession {
    pub kind: ReadingKind,
    pub basis: ChargeBasis,
    pub opened_at: Timestamp,
}

/// Outcome of claiming a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionClaim {
    /// The session is live; the context message belongs to it.
    Active(ReadingSession),
    /// The session outlived its TTL; the caller owns the cleanup (refund
    /// of a debited basis).
    Expired(ReadingSession),
}

/// In-process store of open reading sessions, one per user.
///
/// Sessions are claimed at most once: a claim removes the record whether
/// it was live or expired. Opening a new session for a user who already
/// has one returns the old record so its debit is not silently lost.
#[derive(Debug, Clone)]
pub struct ReadingSessionStore {
    ttl_secs: i64,
    sessions: Arc<RwLock<HashMap<UserId, ReadingSession>>>,
}

impl ReadingSessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs: ttl_secs as i64,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Opens a session, returning any session it displaced.
    pub async fn open(
        &self,
        id: UserId,
        kind: ReadingKind,
        basis: ChargeBasis,
        now: Timestamp,
    ) -> Option<ReadingSession> {
        self.sessions.write().await.insert(
            id,
            ReadingSession {
                kind,
                basis,
                opened_at: now,
            },
        )
    }

    /// Claims and removes the user's session, if any.
    pub async fn claim(&self, id: UserId, now: Timestamp) -> Option<SessionClaim> {
        let session = self.sessions.write().await.remove(&id)?;
        if now.duration_since(&session.opened_at).num_seconds() >= self.ttl_secs {
            Some(SessionClaim::Expired(session))
        } else {
            Some(SessionClaim::Active(session))
        }
    }

    /// Whether the user currently has an open session.
    pub async fn is_open(&self, id: UserId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }
}
