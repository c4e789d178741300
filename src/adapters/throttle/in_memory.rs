//! In-memory per-user cooldown gate.
//!
//! One long-lived instance owns the last-seen map and is injected wherever
//! throttling is needed. State is process-local and lost on restart, which
//! is acceptable for a UX nicety.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::LimitsConfig;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::ThrottleGuard;

/// Fixed-window cooldown throttle.
#[derive(Debug)]
pub struct CooldownThrottle {
    window_secs: i64,
    last_seen: Arc<RwLock<HashMap<UserId, Timestamp>>>,
}

impl CooldownThrottle {
    /// Creates a throttle with the given cooldown window.
    pub fn new(window_secs: u64) -> Self {
        Self {
            window_secs: window_secs as i64,
            last_seen: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a throttle from the configured limits.
    pub fn from_limits(limits: &LimitsConfig) -> Self {
        Self::new(limits.throttle_window_secs)
    }
}

#[async_trait]
impl ThrottleGuard for CooldownThrottle {
    async fn allow(&self, id: UserId, now: Timestamp) -> bool {
        let mut last_seen = self.last_seen.write().await;

        if let Some(last) = last_seen.get(&id) {
            if now.duration_since(last).num_seconds() < self.window_secs {
                return false;
            }
        }

        last_seen.insert(id, now);
        true
    }
}
