//! Payment gateway port - issuing top-up invoices.
//!
//! The platform's native micropayment mechanism delivers invoices to the
//! user and, once paid, emits an asynchronous confirmation. The core only
//! issues invoices and credits confirmations; everything in between is the
//! platform's concern. There is no auto-resume: after topping up, the user
//! re-triggers the action.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Port for sending credit top-up invoices.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Issues an invoice to the user's chat.
    async fn send_invoice(&self, invoice: InvoiceRequest) -> Result<(), PaymentGatewayError>;
}

/// An invoice for `amount` credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// Price of the invoice in credits.
    pub amount: u32,
    /// Opaque payload echoed back in the confirmation.
    pub payload: TopUpPayload,
}

/// Payload tagged onto a top-up invoice, `topup:<credits>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopUpPayload {
    pub credits: u32,
}

impl TopUpPayload {
    pub fn new(credits: u32) -> Self {
        Self { credits }
    }
}

impl fmt::Display for TopUpPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topup:{}", self.credits)
    }
}

impl FromStr for TopUpPayload {
    type Err = InvalidPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let credits = s
            .strip_prefix("topup:")
            .ok_or(InvalidPayload)?
            .parse()
            .map_err(|_| InvalidPayload)?;
        Ok(Self { credits })
    }
}

/// The payload string did not carry a top-up tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not a top-up payload")]
pub struct InvalidPayload;

/// Asynchronous confirmation that an invoice was paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub user_id: UserId,
    /// Credits actually paid, as reported by the platform.
    pub amount_paid: u32,
    /// The payload the invoice was tagged with, verbatim.
    pub payload: String,
}

/// Errors from payment gateway operations.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// The platform refused or failed to deliver the invoice.
    #[error("invoice delivery failed: {0}")]
    DeliveryFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn payload_round_trips() {
        let payload = TopUpPayload::new(25);
        let parsed: TopUpPayload = payload.to_string().parse().unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn payload_rejects_foreign_tags() {
        assert!("refund:25".parse::<TopUpPayload>().is_err());
        assert!("topup:abc".parse::<TopUpPayload>().is_err());
    }
}
