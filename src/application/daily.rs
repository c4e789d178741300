//! The free daily card.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AccessConfig;
use crate::domain::foundation::{CalendarDate, Timestamp, UserId};
use crate::domain::ledger::{DisplayHints, LedgerError};
use crate::domain::reading::ReadingKind;
use crate::ports::{GenerationProvider, GenerationRequest, ThrottleGuard};

use super::entitlement::EntitlementGate;
use super::ledger::AccountLedger;

/// Outcome of a daily card request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    Fulfilled { text: String },
    /// The free card was already claimed today.
    AlreadyClaimed,
    /// Generation failed; the grant was returned so the user may retry
    /// today.
    Failed,
    /// Rejected by the cooldown window; the grant was not touched.
    Throttled,
}

/// Hands out the once-per-day free card.
///
/// The entitlement is stamped before generation runs, so two racing
/// requests cannot both get a free card. When generation then fails the
/// stamp is revoked; the user has not received anything.
#[derive(Clone)]
pub struct DailyReading {
    ledger: AccountLedger,
    gate: EntitlementGate,
    provider: Arc<dyn GenerationProvider>,
    throttle: Arc<dyn ThrottleGuard>,
    access: AccessConfig,
    reset_offset_minutes: i32,
}

impl DailyReading {
    pub fn new(
        ledger: AccountLedger,
        gate: EntitlementGate,
        provider: Arc<dyn GenerationProvider>,
        throttle: Arc<dyn ThrottleGuard>,
        access: AccessConfig,
        reset_offset_minutes: i32,
    ) -> Self {
        Self {
            ledger,
            gate,
            provider,
            throttle,
            access,
            reset_offset_minutes,
        }
    }

    /// Handles one daily card request at time `now`.
    ///
    /// The throttle is consulted before the entitlement, so a rejected
    /// burst never consumes the day's grant.
    pub async fn handle(
        &self,
        user_id: UserId,
        hints: &DisplayHints,
        now: Timestamp,
    ) -> Result<DailyOutcome, LedgerError> {
        if !self.throttle.allow(user_id, now).await {
            return Ok(DailyOutcome::Throttled);
        }

        self.ledger.ensure_user(user_id, hints).await?;

        let date = CalendarDate::at_offset(&now, self.reset_offset_minutes);
        let privileged = self.access.is_privileged(user_id);
        if !privileged && !self.gate.grant_daily(user_id, date).await? {
            return Ok(DailyOutcome::AlreadyClaimed);
        }

        let kind = ReadingKind::DailyCard;
        let request =
            GenerationRequest::new(kind.system_prompt(), kind.opening_prompt().unwrap_or_default());

        match self.provider.generate(request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(user = %user_id, %date, "daily card delivered");
                Ok(DailyOutcome::Fulfilled { text })
            }
            result => {
                if let Err(err) = result {
                    warn!(user = %user_id, error = %err, "daily card generation failed");
                } else {
                    warn!(user = %user_id, "daily card generation returned empty text");
                }
                if !privileged {
                    self.gate.revoke_daily(user_id, date).await?;
                }
                Ok(DailyOutcome::Failed)
            }
        }
    }
}
