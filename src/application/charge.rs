//! Charge orchestration: debit, invoice-on-shortfall, refund-on-failure.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AccessConfig, PricingConfig};
use crate::domain::foundation::UserId;
use crate::domain::ledger::{DisplayHints, LedgerError};
use crate::domain::reading::{ChargeBasis, ChargeRequest, ReadingKind};
use crate::ports::{
    GenerationProvider, GenerationRequest, InvoiceRequest, PaymentGateway, PaymentGatewayError,
    TopUpPayload,
};

use super::ledger::AccountLedger;

/// Result of the debit phase of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The reading may run; the basis says what to refund on failure.
    Proceed { basis: ChargeBasis },
    /// Balance too low; an invoice for the shortfall was delivered.
    AwaitingPayment { invoice_amount: u32 },
}

/// Result of the settlement phase of a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Generation produced usable text.
    Fulfilled { text: String },
    /// Generation failed or came back empty; any debit was returned.
    Failed { refunded: Option<u32> },
}

/// Combined outcome of a single-shot charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Fulfilled { text: String },
    Failed { refunded: Option<u32> },
    AwaitingPayment { invoice_amount: u32 },
}

/// Errors from charge orchestration.
#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invoice delivery failed: {0}")]
    Invoice(#[from] PaymentGatewayError),

    /// The debit succeeded but the compensating credit did not. The user
    /// is owed `amount`; this must not be swallowed.
    #[error("refund of {amount} credits failed: {source}")]
    RefundFailed { amount: u32, source: LedgerError },
}

/// Orchestrates the money side of a reading.
///
/// Debit happens before generation, never after; a failed or empty
/// generation refunds the exact debited amount. Privileged users and
/// zero-priced kinds proceed on a waived basis with nothing to refund.
#[derive(Clone)]
pub struct ChargeOrchestrator {
    ledger: AccountLedger,
    gateway: Arc<dyn PaymentGateway>,
    provider: Arc<dyn GenerationProvider>,
    pricing: PricingConfig,
    access: AccessConfig,
}

impl ChargeOrchestrator {
    pub fn new(
        ledger: AccountLedger,
        gateway: Arc<dyn PaymentGateway>,
        provider: Arc<dyn GenerationProvider>,
        pricing: PricingConfig,
        access: AccessConfig,
    ) -> Self {
        Self {
            ledger,
            gateway,
            provider,
            pricing,
            access,
        }
    }

    /// Debits the price of `kind`, or delivers a top-up invoice when the
    /// balance cannot cover it.
    ///
    /// On `AwaitingPayment` nothing was debited and nothing resumes
    /// automatically after payment; the user re-triggers the reading.
    pub async fn debit_or_invoice(
        &self,
        user_id: UserId,
        kind: ReadingKind,
        hints: &DisplayHints,
    ) -> Result<DebitOutcome, ChargeError> {
        self.ledger.ensure_user(user_id, hints).await?;

        if self.access.is_privileged(user_id) {
            info!(user = %user_id, action = kind.action_key(), "charge waived for privileged user");
            return Ok(DebitOutcome::Proceed {
                basis: ChargeBasis::Waived,
            });
        }

        let request = ChargeRequest::new(user_id, kind, self.pricing.price_for(kind));
        if request.price == 0 {
            return Ok(DebitOutcome::Proceed {
                basis: ChargeBasis::Waived,
            });
        }

        match self.ledger.adjust(user_id, -(request.price as i64)).await {
            Ok(remaining) => {
                info!(
                    user = %user_id,
                    action = kind.action_key(),
                    price = request.price,
                    remaining,
                    "debited"
                );
                Ok(DebitOutcome::Proceed {
                    basis: ChargeBasis::Debited {
                        price: request.price,
                    },
                })
            }
            Err(LedgerError::InsufficientBalance { balance, .. }) => {
                info!(
                    user = %user_id,
                    action = kind.action_key(),
                    balance,
                    price = request.price,
                    "insufficient balance, sending invoice"
                );
                self.gateway
                    .send_invoice(InvoiceRequest {
                        user_id,
                        title: kind.invoice_title().to_string(),
                        description: kind.invoice_description(request.price),
                        amount: request.price,
                        payload: TopUpPayload::new(request.price),
                    })
                    .await?;
                Ok(DebitOutcome::AwaitingPayment {
                    invoice_amount: request.price,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Runs generation and settles the debit.
    ///
    /// A provider error or empty/whitespace-only text counts as failure
    /// and triggers the refund of a debited basis.
    pub async fn generate_and_settle(
        &self,
        user_id: UserId,
        basis: ChargeBasis,
        request: GenerationRequest,
    ) -> Result<SettleOutcome, ChargeError> {
        let generated = self.provider.generate(request).await;
        self.settle(user_id, basis, generated).await
    }

    /// Settles a debit against a generation result.
    pub async fn settle(
        &self,
        user_id: UserId,
        basis: ChargeBasis,
        generated: Result<String, crate::ports::GenerationError>,
    ) -> Result<SettleOutcome, ChargeError> {
        match generated {
            Ok(text) if !text.trim().is_empty() => Ok(SettleOutcome::Fulfilled { text }),
            Ok(_) => {
                warn!(user = %user_id, "generation returned empty text");
                let refunded = self.refund(user_id, basis).await?;
                Ok(SettleOutcome::Failed { refunded })
            }
            Err(err) => {
                warn!(user = %user_id, error = %err, "generation failed");
                let refunded = self.refund(user_id, basis).await?;
                Ok(SettleOutcome::Failed { refunded })
            }
        }
    }

    /// Single-shot charge: debit, generate, settle.
    pub async fn charge(
        &self,
        user_id: UserId,
        kind: ReadingKind,
        hints: &DisplayHints,
        request: GenerationRequest,
    ) -> Result<ChargeOutcome, ChargeError> {
        match self.debit_or_invoice(user_id, kind, hints).await? {
            DebitOutcome::AwaitingPayment { invoice_amount } => {
                Ok(ChargeOutcome::AwaitingPayment { invoice_amount })
            }
            DebitOutcome::Proceed { basis } => {
                match self.generate_and_settle(user_id, basis, request).await? {
                    SettleOutcome::Fulfilled { text } => Ok(ChargeOutcome::Fulfilled { text }),
                    SettleOutcome::Failed { refunded } => Ok(ChargeOutcome::Failed { refunded }),
                }
            }
        }
    }

    /// Returns the debit behind `basis`, if any.
    ///
    /// Used by the settlement path and for readings abandoned before
    /// their context arrived.
    pub async fn refund(
        &self,
        user_id: UserId,
        basis: ChargeBasis,
    ) -> Result<Option<u32>, ChargeError> {
        let Some(amount) = basis.refundable() else {
            return Ok(None);
        };
        match self.ledger.adjust(user_id, amount as i64).await {
            Ok(balance) => {
                info!(user = %user_id, amount, balance, "refunded");
                Ok(Some(amount))
            }
            Err(source) => Err(ChargeError::RefundFailed { amount, source }),
        }
    }
}
