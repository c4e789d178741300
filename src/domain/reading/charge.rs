//! Charge request and charge basis value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::ReadingKind;

/// Ephemeral description of one priced interaction.
///
/// Produced per trigger, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeRequest {
    pub user_id: UserId,
    pub kind: ReadingKind,
    /// Price in credits; zero only for the free daily card.
    pub price: u32,
}

impl ChargeRequest {
    pub fn new(user_id: UserId, kind: ReadingKind, price: u32) -> Self {
        Self {
            user_id,
            kind,
            price,
        }
    }
}

/// How a reading was paid for when it started.
///
/// Carried in the session record so the settlement step knows what to
/// refund if generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "basis")]
pub enum ChargeBasis {
    /// Credits were debited up front.
    Debited { price: u32 },
    /// Privileged bypass; nothing was debited and nothing is refunded.
    Waived,
}

impl ChargeBasis {
    /// The amount a failed settlement must credit back.
    pub fn refundable(&self) -> Option<u32> {
        match self {
            ChargeBasis::Debited { price } => Some(*price),
            ChargeBasis::Waived => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debited_basis_is_refundable() {
        assert_eq!(ChargeBasis::Debited { price: 25 }.refundable(), Some(25));
    }

    #[test]
    fn waived_basis_is_not_refundable() {
        assert_eq!(ChargeBasis::Waived.refundable(), None);
    }
}
