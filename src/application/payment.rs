//! Top-up crediting after a confirmed payment.

use tracing::{info, warn};

use crate::domain::ledger::LedgerError;
use crate::ports::{PaymentConfirmation, TopUpPayload};

use super::ledger::AccountLedger;

/// Credits confirmed top-up payments to the ledger.
///
/// Deliberately not throttled: a confirmation arrives from the payment
/// platform after real money moved, and dropping it would lose paid
/// credits.
#[derive(Clone)]
pub struct TopUpService {
    ledger: AccountLedger,
}

impl TopUpService {
    pub fn new(ledger: AccountLedger) -> Self {
        Self { ledger }
    }

    /// Credits the paid amount and returns the new balance.
    ///
    /// The amount actually paid governs; the invoice payload is only
    /// cross-checked and a mismatch logged. Creates the account when the
    /// payer is unknown, so a credit can never be dropped.
    pub async fn confirm(&self, confirmation: PaymentConfirmation) -> Result<i64, LedgerError> {
        match confirmation.payload.parse::<TopUpPayload>() {
            Ok(payload) if payload.credits != confirmation.amount_paid => {
                warn!(
                    user = %confirmation.user_id,
                    paid = confirmation.amount_paid,
                    invoiced = payload.credits,
                    "paid amount differs from invoiced amount"
                );
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    user = %confirmation.user_id,
                    payload = %confirmation.payload,
                    error = %err,
                    "unrecognized top-up payload, crediting paid amount"
                );
            }
        }

        let balance = self
            .ledger
            .adjust(confirmation.user_id, confirmation.amount_paid as i64)
            .await?;
        info!(
            user = %confirmation.user_id,
            credited = confirmation.amount_paid,
            balance,
            "top-up confirmed"
        );
        Ok(balance)
    }
}
