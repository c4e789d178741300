//! The paid reading flow.
//!
//! Topic readings are two-phase: the debit happens when the user picks
//! the topic, generation happens when their context message arrives. The
//! open session carries the charge basis across the gap so a failure on
//! either side refunds correctly.
//!
//! Triggers pass the throttle guard before any money moves. The context
//! message and payment confirmations are exempt: the first belongs to a
//! trigger that already paid the toll, the second carries real money.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::ledger::DisplayHints;
use crate::domain::reading::{ReadingKind, TopicReading};
use crate::ports::{AudioAttachment, GenerationRequest, ThrottleGuard};

use super::charge::{ChargeError, ChargeOrchestrator, ChargeOutcome, DebitOutcome, SettleOutcome};
use super::session::{ReadingSessionStore, SessionClaim};

/// Outcome of starting a topic reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Debit (or waiver) succeeded; the bot should ask for context.
    AwaitingContext { kind: ReadingKind },
    /// Balance too low; an invoice was delivered instead.
    AwaitingPayment { invoice_amount: u32 },
    /// Rejected by the cooldown window; nothing happened.
    Throttled,
}

/// The user's context message for an open reading.
#[derive(Debug, Clone)]
pub enum ReadingInput {
    Text(String),
    Voice(AudioAttachment),
}

/// Outcome of feeding a context message to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOutcome {
    Fulfilled { kind: ReadingKind, text: String },
    /// Generation failed; any debit was returned.
    Failed { refunded: Option<u32> },
    /// No reading is waiting for context; the message is ordinary chat.
    NoSession,
    /// The session outlived its TTL; any debit was returned.
    Expired { refunded: Option<u32> },
}

/// Outcome of the single-shot universe advice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Fulfilled { text: String },
    /// Generation failed; any debit was returned.
    Failed { refunded: Option<u32> },
    /// Balance too low; an invoice was delivered instead.
    AwaitingPayment { invoice_amount: u32 },
    /// Rejected by the cooldown window; nothing happened.
    Throttled,
}

/// Drives the paid readings end to end.
#[derive(Clone)]
pub struct ReadingFlow {
    orchestrator: ChargeOrchestrator,
    sessions: ReadingSessionStore,
    throttle: Arc<dyn ThrottleGuard>,
}

impl ReadingFlow {
    pub fn new(
        orchestrator: ChargeOrchestrator,
        sessions: ReadingSessionStore,
        throttle: Arc<dyn ThrottleGuard>,
    ) -> Self {
        Self {
            orchestrator,
            sessions,
            throttle,
        }
    }

    /// Starts a topic reading: debit now, generate when context arrives.
    ///
    /// A session the user abandoned by starting over is refunded before
    /// the new debit.
    pub async fn begin(
        &self,
        user_id: UserId,
        topic: TopicReading,
        hints: &DisplayHints,
        now: Timestamp,
    ) -> Result<BeginOutcome, ChargeError> {
        if !self.throttle.allow(user_id, now).await {
            return Ok(BeginOutcome::Throttled);
        }

        if let Some(claim) = self.sessions.claim(user_id, now).await {
            let session = match claim {
                SessionClaim::Active(session) | SessionClaim::Expired(session) => session,
            };
            let refunded = self.orchestrator.refund(user_id, session.basis).await?;
            info!(
                user = %user_id,
                abandoned = session.kind.action_key(),
                ?refunded,
                "restarted reading, previous session closed"
            );
        }

        let kind = ReadingKind::from(topic);
        match self.orchestrator.debit_or_invoice(user_id, kind, hints).await? {
            DebitOutcome::Proceed { basis } => {
                self.sessions.open(user_id, kind, basis, now).await;
                Ok(BeginOutcome::AwaitingContext { kind })
            }
            DebitOutcome::AwaitingPayment { invoice_amount } => {
                Ok(BeginOutcome::AwaitingPayment { invoice_amount })
            }
        }
    }

    /// Feeds a context message to the user's open reading.
    ///
    /// Not throttled: the trigger that opened the session already passed
    /// the cooldown, and rejecting the paid follow-up would strand the
    /// debit.
    pub async fn provide_context(
        &self,
        user_id: UserId,
        input: ReadingInput,
        now: Timestamp,
    ) -> Result<ContextOutcome, ChargeError> {
        let session = match self.sessions.claim(user_id, now).await {
            None => return Ok(ContextOutcome::NoSession),
            Some(SessionClaim::Expired(session)) => {
                let refunded = self.orchestrator.refund(user_id, session.basis).await?;
                info!(user = %user_id, ?refunded, "reading session expired");
                return Ok(ContextOutcome::Expired { refunded });
            }
            Some(SessionClaim::Active(session)) => session,
        };

        let request = match input {
            ReadingInput::Text(text) => GenerationRequest::new(
                session.kind.system_prompt(),
                session.kind.context_prompt(&text),
            ),
            ReadingInput::Voice(attachment) => {
                GenerationRequest::new(session.kind.system_prompt(), session.kind.voice_prompt())
                    .with_attachment(attachment)
            }
        };

        match self
            .orchestrator
            .generate_and_settle(user_id, session.basis, request)
            .await?
        {
            SettleOutcome::Fulfilled { text } => Ok(ContextOutcome::Fulfilled {
                kind: session.kind,
                text,
            }),
            SettleOutcome::Failed { refunded } => Ok(ContextOutcome::Failed { refunded }),
        }
    }

    /// Single-shot universe advice: debit, generate, settle in one step.
    pub async fn advise(
        &self,
        user_id: UserId,
        hints: &DisplayHints,
        now: Timestamp,
    ) -> Result<AdviceOutcome, ChargeError> {
        if !self.throttle.allow(user_id, now).await {
            return Ok(AdviceOutcome::Throttled);
        }

        let kind = ReadingKind::UniverseAdvice;
        let request = GenerationRequest::new(
            kind.system_prompt(),
            kind.opening_prompt().unwrap_or_default(),
        );
        let outcome = match self.orchestrator.charge(user_id, kind, hints, request).await? {
            ChargeOutcome::Fulfilled { text } => AdviceOutcome::Fulfilled { text },
            ChargeOutcome::Failed { refunded } => AdviceOutcome::Failed { refunded },
            ChargeOutcome::AwaitingPayment { invoice_amount } => {
                AdviceOutcome::AwaitingPayment { invoice_amount }
            }
        };
        Ok(outcome)
    }
}
