//! Throttle guard port - per-user cooldown gate.
//!
//! Rejects repeated triggers from one user within a fixed window. This is
//! a UX nicety, not a security control: implementations may keep state in
//! process memory and lose it on restart.

use async_trait::async_trait;

use crate::domain::foundation::{Timestamp, UserId};

/// Port for the per-user cooldown gate.
#[async_trait]
pub trait ThrottleGuard: Send + Sync {
    /// Whether this trigger is allowed at `now`.
    ///
    /// Returns `false` when the user's previous trigger is still inside
    /// the cooldown window, leaving the recorded last-seen time untouched;
    /// otherwise records `now` and returns `true`.
    async fn allow(&self, id: UserId, now: Timestamp) -> bool;
}
